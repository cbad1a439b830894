//! Terminal front end. Reads numbered menu choices and form fields, drives
//! the `App` handlers and re-renders after each action.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use crate::app::{render_table, App, ContaForm, FormMode, NoticeLevel, View, MSG_CONFIRMAR_EXCLUSAO};
use crate::conta::types::STATUS_SUGERIDOS;
use crate::conta::{ContaId, Tipo};

enum Flow {
    Continue,
    Exit,
}

pub async fn start(app: &mut App) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    run(app, &mut input, &mut out, true).await
}

/// Main loop. Ends on the exit option or end of input.
pub async fn run<R: BufRead, W: Write>(
    app: &mut App,
    input: &mut R,
    out: &mut W,
    color: bool,
) -> io::Result<()> {
    print_banner(out, app)?;
    loop {
        print_notices(out, app)?;
        let flow = match app.state.view {
            View::Auth => auth_screen(app, input, out).await?,
            View::Main => dashboard(app, input, out, color).await?,
        };
        if let Flow::Exit = flow {
            writeln!(out, "\nAté logo.")?;
            return Ok(());
        }
    }
}

fn print_banner<W: Write>(out: &mut W, app: &App) -> io::Result<()> {
    writeln!(out, "========================================")?;
    writeln!(out, "      CONTAS A PAGAR E A RECEBER        ")?;
    writeln!(out, "========================================")?;
    writeln!(out, "API: {}", app.api.base_url())
}

fn print_notices<W: Write>(out: &mut W, app: &mut App) -> io::Result<()> {
    for n in app.state.notices.take_unshown(Instant::now()) {
        let tag = match n.nivel {
            NoticeLevel::Success => "✓",
            NoticeLevel::Warning => "⚠️ ",
            NoticeLevel::Danger => "❌",
        };
        writeln!(out, "{} {}", tag, n.texto)?;
    }
    Ok(())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> io::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt showing the current value; an empty answer keeps it.
fn prompt_default<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
    atual: &str,
) -> io::Result<Option<String>> {
    let shown = if atual.is_empty() {
        format!("{}: ", label)
    } else {
        format!("{} [{}]: ", label, atual)
    };
    Ok(prompt(input, out, &shown)?.map(|s| if s.is_empty() { atual.to_string() } else { s }))
}

async fn auth_screen<R: BufRead, W: Write>(app: &mut App, input: &mut R, out: &mut W) -> io::Result<Flow> {
    let mode = app.state.auth.mode;
    writeln!(out, "\n--- {} ---", mode.titulo())?;
    writeln!(out, "1. {}", mode.botao())?;
    writeln!(out, "2. {}", mode.texto_alternar())?;
    writeln!(out, "0. Sair")?;

    let Some(choice) = prompt(input, out, "Selecione: ")? else {
        return Ok(Flow::Exit);
    };
    match choice.as_str() {
        "1" => {
            let Some(username) = prompt(input, out, "Usuário: ")? else {
                return Ok(Flow::Exit);
            };
            let Some(password) = prompt(input, out, "Senha: ")? else {
                return Ok(Flow::Exit);
            };
            app.set_credentials(&username, &password);
            app.submit_auth().await;
        }
        "2" => app.toggle_register(),
        "0" => return Ok(Flow::Exit),
        _ => writeln!(out, "Opção inválida.")?,
    }
    Ok(Flow::Continue)
}

async fn dashboard<R: BufRead, W: Write>(
    app: &mut App,
    input: &mut R,
    out: &mut W,
    color: bool,
) -> io::Result<Flow> {
    writeln!(out, "\n--- Contas ---")?;
    let filtro = &app.state.filtro;
    if !filtro.is_empty() {
        writeln!(
            out,
            "Filtros: tipo={} status={}",
            filtro.tipo.map(|t| t.rotulo()).unwrap_or("Todos"),
            filtro.status.as_deref().unwrap_or("Todos"),
        )?;
    }
    write!(out, "{}", render_table(&app.rows(), color))?;

    writeln!(out, "\n1. Nova Conta")?;
    writeln!(out, "2. Editar")?;
    writeln!(out, "3. Excluir")?;
    writeln!(out, "4. Filtrar por tipo")?;
    writeln!(out, "5. Filtrar por status")?;
    writeln!(out, "6. Recarregar")?;
    writeln!(out, "7. Sair da conta")?;
    writeln!(out, "0. Encerrar")?;

    let Some(choice) = prompt(input, out, "Selecione: ")? else {
        return Ok(Flow::Exit);
    };
    match choice.as_str() {
        "1" => {
            app.abrir_nova_conta();
            return modal(app, input, out).await;
        }
        "2" => {
            let Some(id) = prompt_id(input, out)? else {
                return Ok(Flow::Continue);
            };
            app.editar_conta(id).await;
            return modal(app, input, out).await;
        }
        "3" => {
            let Some(id) = prompt_id(input, out)? else {
                return Ok(Flow::Continue);
            };
            let Some(answer) = prompt(input, out, &format!("{} [s/N]: ", MSG_CONFIRMAR_EXCLUSAO))? else {
                return Ok(Flow::Exit);
            };
            let confirmado = matches!(answer.to_lowercase().as_str(), "s" | "sim" | "y");
            app.deletar_conta(id, confirmado).await;
        }
        "4" => {
            let Some(answer) = prompt(input, out, "Tipo (pagar/receber, vazio = todos): ")? else {
                return Ok(Flow::Exit);
            };
            if answer.is_empty() {
                app.set_filtro_tipo(None).await;
            } else {
                match answer.parse::<Tipo>() {
                    Ok(t) => app.set_filtro_tipo(Some(t)).await,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
        }
        "5" => {
            let label = format!("Status ({}, vazio = todos): ", STATUS_SUGERIDOS.join("/"));
            let Some(answer) = prompt(input, out, &label)? else {
                return Ok(Flow::Exit);
            };
            app.set_filtro_status(Some(answer)).await;
        }
        "6" => app.carregar_contas().await,
        "7" => app.logout().await,
        "0" => return Ok(Flow::Exit),
        _ => writeln!(out, "Opção inválida.")?,
    }
    Ok(Flow::Continue)
}

fn prompt_id<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<ContaId>> {
    let Some(raw) = prompt(input, out, "ID da conta: ")? else {
        return Ok(None);
    };
    match raw.parse::<ContaId>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            writeln!(out, "ID inválido.")?;
            Ok(None)
        }
    }
}

/// Form loop for the open modal. Repeats until the save succeeds, the user
/// cancels, or the session expires.
async fn modal<R: BufRead, W: Write>(app: &mut App, input: &mut R, out: &mut W) -> io::Result<Flow> {
    while let Some(form) = app.state.modal.clone() {
        print_notices(out, app)?;
        writeln!(out, "\n--- {} ---", form.titulo())?;
        if let FormMode::Editar(id) = form.mode {
            writeln!(out, "ID: {}", id)?;
        }

        let Some(edited) = fill_form(input, out, form)? else {
            return Ok(Flow::Exit);
        };
        app.state.modal = Some(edited);

        let Some(answer) = prompt(input, out, "Salvar? [S/n = cancelar]: ")? else {
            return Ok(Flow::Exit);
        };
        if matches!(answer.to_lowercase().as_str(), "n" | "nao" | "não") {
            app.fechar_modal();
            break;
        }
        app.salvar_conta().await;
    }
    Ok(Flow::Continue)
}

fn fill_form<R: BufRead, W: Write>(input: &mut R, out: &mut W, mut form: ContaForm) -> io::Result<Option<ContaForm>> {
    macro_rules! field {
        ($label:expr, $atual:expr) => {
            match prompt_default(input, out, $label, $atual)? {
                Some(v) => v,
                None => return Ok(None),
            }
        };
    }

    form.descricao = field!("Descrição", &form.descricao);
    form.valor = field!("Valor", &form.valor);
    form.data_vencimento = field!("Vencimento (aaaa-mm-dd)", &form.data_vencimento);
    loop {
        let tipo = field!("Tipo (pagar/receber)", form.tipo.as_str());
        match tipo.parse::<Tipo>() {
            Ok(t) => {
                form.tipo = t;
                break;
            }
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
    let label = format!("Status ({})", STATUS_SUGERIDOS.join("/"));
    form.status = field!(&label, &form.status);
    Ok(Some(form))
}
