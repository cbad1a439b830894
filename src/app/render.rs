use crate::conta::format::{capitalizar, formatar_data, formatar_valor};
use crate::conta::{Conta, ContaId};

use super::state::AppState;

/// One table row, already formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContaRow {
    pub id: ContaId,
    pub descricao: String,
    pub valor: String,
    pub classe_valor: &'static str,
    pub vencimento: String,
    pub tipo: &'static str,
    pub status: String,
    pub classe_status: String,
}

impl From<&Conta> for ContaRow {
    fn from(conta: &Conta) -> Self {
        Self {
            id: conta.id,
            descricao: conta.descricao.clone(),
            valor: formatar_valor(conta.valor),
            classe_valor: conta.tipo.classe_valor(),
            vencimento: formatar_data(conta.data_vencimento),
            tipo: conta.tipo.rotulo(),
            status: capitalizar(&conta.status),
            classe_status: format!("status-{}", conta.status),
        }
    }
}

/// Rows of the current snapshot that pass the active filter.
pub fn rows(state: &AppState) -> Vec<ContaRow> {
    state.visible_contas().into_iter().map(ContaRow::from).collect()
}

const GREEN: &str = "\x1B[32m";
const RED: &str = "\x1B[31m";
const RESET: &str = "\x1B[0m";

/// Plain-text table. `color` wraps the value cell in ANSI green/red.
pub fn render_table(rows: &[ContaRow], color: bool) -> String {
    if rows.is_empty() {
        return "  (nenhuma conta)\n".to_string();
    }

    let w_desc = rows.iter().map(|r| r.descricao.chars().count()).max().unwrap_or(0).max(9);
    let w_valor = rows.iter().map(|r| r.valor.chars().count()).max().unwrap_or(0).max(5);

    let mut out = format!(
        "{:>5}  {:<w_desc$}  {:>w_valor$}  {:<10}  {:<9}  {}\n",
        "ID", "Descrição", "Valor", "Vencimento", "Tipo", "Status",
    );
    for r in rows {
        let valor = format!("{:>w_valor$}", r.valor);
        let valor = if color {
            let c = if r.classe_valor == "valor-positivo" { GREEN } else { RED };
            format!("{}{}{}", c, valor, RESET)
        } else {
            valor
        };
        out.push_str(&format!(
            "{:>5}  {:<w_desc$}  {}  {:<10}  {:<9}  [{}]\n",
            r.id, r.descricao, valor, r.vencimento, r.tipo, r.status,
        ));
    }
    out
}
