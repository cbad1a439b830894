//! Application handlers
//!
//! `App` pairs the HTTP client with explicit UI state. Each handler maps
//! one user action to a request/response cycle and the resulting state
//! transition. Failures become notices and never abort the session.

pub mod render;
pub mod state;

use tracing::{info, warn};

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::conta::{ContaId, Filtro, MensagemResponse, Tipo};
use crate::error::ClientError;

pub use render::{render_table, rows, ContaRow};
pub use state::{AppState, AuthMode, ContaForm, FormMode, Notice, NoticeLevel, View};

pub const MSG_ERRO_CONEXAO: &str = "Erro ao conectar com o servidor";
pub const MSG_ERRO_LOGOUT: &str = "Erro ao fazer logout";
pub const MSG_ERRO_CARREGAR_CONTAS: &str = "Erro ao carregar contas";
pub const MSG_ERRO_CARREGAR_CONTA: &str = "Erro ao carregar conta";
pub const MSG_ERRO_SALVAR: &str = "Erro ao salvar conta";
pub const MSG_ERRO_EXCLUIR: &str = "Erro ao excluir conta";
pub const MSG_SESSAO_EXPIRADA: &str = "Sessão expirada. Por favor, faça login novamente.";
pub const MSG_CONFIRMAR_EXCLUSAO: &str = "Tem certeza que deseja excluir esta conta?";

pub struct App {
    pub api: ApiClient,
    pub state: AppState,
}

impl App {
    pub fn new(api: ApiClient, config: &ClientConfig) -> Self {
        Self {
            api,
            state: AppState::new(config.ui.notice_ttl()),
        }
    }

    fn notify_success(&mut self, resp: MensagemResponse) {
        if let Some(msg) = resp.mensagem {
            self.state.notify(msg, NoticeLevel::Success);
        }
    }

    /// Shows the server's `erro`, or `fallback` when the failure carried none.
    fn notify_error(&mut self, err: &ClientError, fallback: &str) {
        let texto = err.server_message().unwrap_or(fallback).to_string();
        self.state.notify(texto, NoticeLevel::Danger);
    }

    fn session_expired(&mut self) {
        info!("Session expired, returning to auth view");
        self.state.enter_auth();
    }

    // ========== Authentication ==========

    pub fn toggle_register(&mut self) {
        self.state.auth.mode = self.state.auth.mode.toggled();
    }

    pub fn set_credentials(&mut self, username: &str, password: &str) {
        self.state.auth.username = username.to_string();
        self.state.auth.password = password.to_string();
    }

    /// Posts the auth form to `/login` or `/registrar` depending on the mode.
    pub async fn submit_auth(&mut self) {
        let credenciais = self.state.auth.credenciais();
        let mode = self.state.auth.mode;

        let result = match mode {
            AuthMode::Login => self.api.login(&credenciais).await,
            AuthMode::Registro => self.api.registrar(&credenciais).await,
        };

        match result {
            Ok(resp) => {
                self.notify_success(resp);
                match mode {
                    AuthMode::Login => {
                        info!("Logged in as {}", credenciais.username);
                        self.state.enter_main();
                        self.carregar_contas().await;
                    }
                    AuthMode::Registro => {
                        info!("Registered user {}", credenciais.username);
                        self.toggle_register();
                    }
                }
            }
            Err(e) if e.is_network() => {
                warn!("Auth request failed: {}", e);
                self.state.notify(MSG_ERRO_CONEXAO, NoticeLevel::Danger);
            }
            Err(e) => self.notify_error(&e, MSG_ERRO_CONEXAO),
        }
    }

    /// Any HTTP answer ends the session locally. Only a transport error keeps
    /// the user in the main view.
    pub async fn logout(&mut self) {
        match self.api.logout().await {
            Err(e) if e.is_network() => {
                warn!("Logout failed: {}", e);
                self.state.notify(MSG_ERRO_LOGOUT, NoticeLevel::Danger);
            }
            _ => {
                info!("Logged out");
                self.state.enter_auth();
                self.state.auth.clear_credentials();
            }
        }
    }

    // ========== Listing ==========

    pub async fn carregar_contas(&mut self) {
        match self.api.listar_contas().await {
            Ok(contas) => {
                info!("Loaded {} contas", contas.len());
                self.state.contas = contas;
            }
            Err(e) if e.is_network() => {
                warn!("List failed: {}", e);
                self.state.notify(MSG_ERRO_CARREGAR_CONTAS, NoticeLevel::Danger);
            }
            Err(e) => {
                if e.is_unauthorized() {
                    self.session_expired();
                }
                self.notify_error(&e, MSG_ERRO_CARREGAR_CONTAS);
            }
        }
    }

    /// Filter changes reload the list before the new filter is rendered.
    pub async fn set_filtro(&mut self, filtro: Filtro) {
        self.state.filtro = filtro;
        self.carregar_contas().await;
    }

    pub async fn set_filtro_tipo(&mut self, tipo: Option<Tipo>) {
        let filtro = Filtro { tipo, ..self.state.filtro.clone() };
        self.set_filtro(filtro).await;
    }

    pub async fn set_filtro_status(&mut self, status: Option<String>) {
        let status = status.filter(|s| !s.trim().is_empty());
        let filtro = Filtro { status, ..self.state.filtro.clone() };
        self.set_filtro(filtro).await;
    }

    pub fn rows(&self) -> Vec<ContaRow> {
        rows(&self.state)
    }

    // ========== Create / edit ==========

    pub fn abrir_nova_conta(&mut self) {
        self.state.modal = Some(ContaForm::nova());
    }

    pub fn fechar_modal(&mut self) {
        self.state.modal = None;
    }

    /// Fetches the record and opens the modal populated with it.
    pub async fn editar_conta(&mut self, id: ContaId) {
        match self.api.obter_conta(id).await {
            Ok(conta) => {
                self.state.modal = Some(ContaForm::editar(&conta));
            }
            Err(e) if e.is_network() => {
                warn!("Fetch of conta {} failed: {}", id, e);
                self.state.notify(MSG_ERRO_CARREGAR_CONTA, NoticeLevel::Danger);
            }
            Err(e) => {
                if e.is_unauthorized() {
                    self.session_expired();
                }
                self.notify_error(&e, MSG_ERRO_CARREGAR_CONTA);
            }
        }
    }

    /// Submits the open modal: PUT when editing, POST when creating.
    /// The modal stays open on any failure except session expiry.
    pub async fn salvar_conta(&mut self) {
        let Some(form) = self.state.modal.clone() else {
            return;
        };

        let payload = match form.to_payload() {
            Ok(p) => p,
            Err(e) => {
                let texto = match &e {
                    ClientError::InvalidInput(msg) => msg.clone(),
                    other => other.to_string(),
                };
                self.state.notify(texto, NoticeLevel::Danger);
                return;
            }
        };

        let result = match form.mode {
            FormMode::Editar(id) => self.api.atualizar_conta(id, &payload).await,
            FormMode::Criar => self.api.criar_conta(&payload).await,
        };

        match result {
            Ok(resp) => {
                if let Some(id) = resp.id {
                    info!("Created conta {}", id);
                }
                self.notify_success(resp);
                self.fechar_modal();
                self.carregar_contas().await;
            }
            Err(e) if e.is_unauthorized() => {
                self.session_expired();
                self.state.notify(MSG_SESSAO_EXPIRADA, NoticeLevel::Warning);
            }
            Err(e) if e.is_network() => {
                warn!("Save failed: {}", e);
                self.state.notify(MSG_ERRO_SALVAR, NoticeLevel::Danger);
            }
            Err(e) => self.notify_error(&e, MSG_ERRO_SALVAR),
        }
    }

    // ========== Delete ==========

    /// No request is made unless the user confirmed.
    pub async fn deletar_conta(&mut self, id: ContaId, confirmado: bool) {
        if !confirmado {
            return;
        }

        match self.api.excluir_conta(id).await {
            Ok(resp) => {
                info!("Deleted conta {}", id);
                self.notify_success(resp);
                self.carregar_contas().await;
            }
            Err(e) if e.is_network() => {
                warn!("Delete of conta {} failed: {}", id, e);
                self.state.notify(MSG_ERRO_EXCLUIR, NoticeLevel::Danger);
            }
            Err(e) => {
                if e.is_unauthorized() {
                    self.session_expired();
                }
                self.notify_error(&e, MSG_ERRO_EXCLUIR);
            }
        }
    }
}
