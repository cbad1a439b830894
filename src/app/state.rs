//! Explicit UI state. Handlers in `app` take this by `&mut` so every
//! transition can be exercised without a terminal.

use std::time::{Duration, Instant};

use crate::conta::format::{parse_data, parse_valor};
use crate::conta::types::STATUS_PADRAO;
use crate::conta::{Conta, ContaId, ContaPayload, Credenciais, Filtro, Tipo};
use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Auth,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Registro,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Registro,
            AuthMode::Registro => AuthMode::Login,
        }
    }

    pub fn titulo(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Registro => "Registro",
        }
    }

    pub fn botao(&self) -> &'static str {
        match self {
            AuthMode::Login => "Entrar",
            AuthMode::Registro => "Registrar",
        }
    }

    pub fn texto_alternar(&self) -> &'static str {
        match self {
            AuthMode::Login => "Não tem uma conta? Registre-se",
            AuthMode::Registro => "Já tem uma conta? Faça login",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub username: String,
    pub password: String,
}

impl AuthForm {
    pub fn credenciais(&self) -> Credenciais {
        Credenciais {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    pub fn clear_credentials(&mut self) {
        self.username.clear();
        self.password.clear();
    }
}

/// Decides PUT vs POST on save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Criar,
    Editar(ContaId),
}

/// The create/edit modal. Text fields hold what the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ContaForm {
    pub mode: FormMode,
    pub descricao: String,
    pub valor: String,
    pub data_vencimento: String,
    pub tipo: Tipo,
    pub status: String,
}

impl ContaForm {
    pub fn nova() -> Self {
        Self {
            mode: FormMode::Criar,
            descricao: String::new(),
            valor: String::new(),
            data_vencimento: String::new(),
            tipo: Tipo::Pagar,
            status: STATUS_PADRAO.to_string(),
        }
    }

    pub fn editar(conta: &Conta) -> Self {
        Self {
            mode: FormMode::Editar(conta.id),
            descricao: conta.descricao.clone(),
            valor: conta.valor.to_string(),
            data_vencimento: conta.data_vencimento.format("%Y-%m-%d").to_string(),
            tipo: conta.tipo,
            status: conta.status.clone(),
        }
    }

    pub fn titulo(&self) -> &'static str {
        match self.mode {
            FormMode::Criar => "Nova Conta",
            FormMode::Editar(_) => "Editar Conta",
        }
    }

    pub fn to_payload(&self) -> Result<ContaPayload, ClientError> {
        Ok(ContaPayload {
            descricao: self.descricao.trim().to_string(),
            valor: parse_valor(&self.valor)?,
            data_vencimento: parse_data(&self.data_vencimento)?,
            tipo: self.tipo,
            status: self.status.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub texto: String,
    pub nivel: NoticeLevel,
    pub criado_em: Instant,
    /// Set once the terminal has printed it
    pub exibido: bool,
}

/// Transient notifications that expire after `ttl`
#[derive(Debug, Clone)]
pub struct Notices {
    items: Vec<Notice>,
    ttl: Duration,
}

impl Notices {
    pub fn new(ttl: Duration) -> Self {
        Self { items: Vec::new(), ttl }
    }

    pub fn push(&mut self, texto: impl Into<String>, nivel: NoticeLevel) {
        self.push_at(texto, nivel, Instant::now());
    }

    pub fn push_at(&mut self, texto: impl Into<String>, nivel: NoticeLevel, agora: Instant) {
        self.items.push(Notice {
            texto: texto.into(),
            nivel,
            criado_em: agora,
            exibido: false,
        });
    }

    /// Drops expired notices and returns the rest.
    pub fn active(&mut self, agora: Instant) -> &[Notice] {
        let ttl = self.ttl;
        self.items
            .retain(|n| agora.saturating_duration_since(n.criado_em) < ttl);
        &self.items
    }

    /// Live notices not printed yet. Each is returned once and stays
    /// listed in `active` until it expires.
    pub fn take_unshown(&mut self, agora: Instant) -> Vec<Notice> {
        self.active(agora);
        self.items
            .iter_mut()
            .filter(|n| !n.exibido)
            .map(|n| {
                n.exibido = true;
                n.clone()
            })
            .collect()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub auth: AuthForm,
    pub filtro: Filtro,
    /// Render snapshot from the last successful load. Never mutated locally.
    pub contas: Vec<Conta>,
    pub modal: Option<ContaForm>,
    pub notices: Notices,
}

impl AppState {
    pub fn new(notice_ttl: Duration) -> Self {
        Self {
            view: View::Auth,
            auth: AuthForm::default(),
            filtro: Filtro::default(),
            contas: Vec::new(),
            modal: None,
            notices: Notices::new(notice_ttl),
        }
    }

    pub fn enter_main(&mut self) {
        self.view = View::Main;
    }

    /// Back to the auth screen, dropping everything tied to the old session.
    pub fn enter_auth(&mut self) {
        self.view = View::Auth;
        self.contas.clear();
        self.modal = None;
    }

    pub fn notify(&mut self, texto: impl Into<String>, nivel: NoticeLevel) {
        self.notices.push(texto, nivel);
    }

    pub fn visible_contas(&self) -> Vec<&Conta> {
        self.filtro.apply(&self.contas)
    }
}
