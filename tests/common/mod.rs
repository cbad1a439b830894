//! In-process mock of the contas backend, served with axum on an ephemeral port.
#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use financeiro::app::App;
use financeiro::client::ApiClient;
use financeiro::config::ClientConfig;

#[derive(Default)]
pub struct MockState {
    pub users: HashMap<String, String>,
    /// Tokens handed out by `/login` and not yet ended
    pub sessions: HashSet<String>,
    pub session_seq: u64,
    /// When set, `/logout` answers with this status and a non-JSON body
    pub logout_failure: Option<StatusCode>,
    pub contas: Vec<Value>,
    pub next_id: i64,
    /// (method, path) of every request received
    pub requests: Vec<(String, String)>,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockBackend {
    pub base_url: String,
    pub state: Shared,
}

impl MockBackend {
    pub fn seed_user(&self, username: &str, password: &str) {
        self.state
            .lock()
            .unwrap()
            .users
            .insert(username.to_string(), password.to_string());
    }

    pub fn seed_conta(&self, descricao: &str, valor: f64, data: &str, tipo: &str, status: &str) -> i64 {
        let mut s = self.state.lock().unwrap();
        s.next_id += 1;
        let id = s.next_id;
        s.contas.push(json!({
            "id": id,
            "descricao": descricao,
            "valor": valor,
            "data_vencimento": data,
            "tipo": tipo,
            "status": status,
            "data_criacao": "2024-01-01 00:00:00"
        }));
        id
    }

    /// Drops the server-side session, as if it timed out.
    pub fn expire_session(&self) {
        self.state.lock().unwrap().sessions.clear();
    }

    pub fn has_sessions(&self) -> bool {
        !self.state.lock().unwrap().sessions.is_empty()
    }

    pub fn fail_logout_with(&self, status: StatusCode) {
        self.state.lock().unwrap().logout_failure = Some(status);
    }

    pub fn requests(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    pub fn conta(&self, id: i64) -> Option<Value> {
        let s = self.state.lock().unwrap();
        s.contas.iter().find(|c| c["id"] == json!(id)).cloned()
    }

    pub fn conta_count(&self) -> usize {
        self.state.lock().unwrap().contas.len()
    }

    pub fn app(&self) -> App {
        let api = ApiClient::new(&self.base_url).unwrap();
        App::new(api, &ClientConfig::default())
    }
}

/// Base URL where nothing listens, for transport failures.
pub const DEAD_URL: &str = "http://127.0.0.1:1/api";

pub fn dead_app() -> App {
    let api = ApiClient::new(DEAD_URL).unwrap();
    App::new(api, &ClientConfig::default())
}

pub async fn spawn() -> MockBackend {
    let state: Shared = Arc::new(Mutex::new(MockState::default()));

    let api = Router::new()
        .route("/registrar", post(registrar))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/contas", get(listar).post(criar))
        .route("/contas/:id", get(obter).put(atualizar).delete(excluir));

    let app = Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn_with_state(state.clone(), record))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock backend failed");
    });

    MockBackend {
        base_url: format!("http://{}/api", addr),
        state,
    }
}

async fn record(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    state
        .lock()
        .unwrap()
        .requests
        .push((method.to_string(), uri.path().to_string()));
    next.run(req).await
}

fn erro(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "erro": msg }))).into_response()
}

fn mensagem(msg: &str) -> Response {
    (StatusCode::OK, Json(json!({ "mensagem": msg }))).into_response()
}

const SESSION_COOKIE: &str = "session";

fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == SESSION_COOKIE)
        .map(|(_, v)| v.to_string())
}

fn has_session(s: &MockState, headers: &HeaderMap) -> bool {
    session_token(headers).map_or(false, |t| s.sessions.contains(&t))
}

fn nao_logado() -> Response {
    erro(StatusCode::UNAUTHORIZED, "Usuário não está logado")
}

async fn registrar(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();
    let mut s = state.lock().unwrap();
    if s.users.contains_key(&username) {
        return erro(StatusCode::BAD_REQUEST, "Nome de usuário já existe");
    }
    s.users.insert(username, password);
    mensagem("Usuário criado com sucesso!")
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let mut s = state.lock().unwrap();
    if s.users.get(username).map(String::as_str) == Some(password) {
        s.session_seq += 1;
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or_default();
        let token = format!("{:x}{:08x}", s.session_seq, nanos);
        s.sessions.insert(token.clone());
        let cookie = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, token);
        (
            StatusCode::OK,
            [(header::SET_COOKIE, cookie)],
            Json(json!({ "mensagem": "Login realizado com sucesso!" })),
        )
            .into_response()
    } else {
        erro(StatusCode::UNAUTHORIZED, "Usuário ou senha inválidos")
    }
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut s = state.lock().unwrap();
    if let Some(token) = session_token(&headers) {
        s.sessions.remove(&token);
    }
    if let Some(status) = s.logout_failure {
        return (status, "internal error").into_response();
    }
    mensagem("Logout realizado com sucesso!")
}

async fn listar(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let s = state.lock().unwrap();
    if !has_session(&s, &headers) {
        return nao_logado();
    }
    (StatusCode::OK, Json(Value::Array(s.contas.clone()))).into_response()
}

async fn obter(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let s = state.lock().unwrap();
    if !has_session(&s, &headers) {
        return nao_logado();
    }
    match s.contas.iter().find(|c| c["id"] == json!(id)) {
        Some(c) => (StatusCode::OK, Json(c.clone())).into_response(),
        None => erro(StatusCode::NOT_FOUND, "Conta não encontrada"),
    }
}

async fn criar(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let mut s = state.lock().unwrap();
    if !has_session(&s, &headers) {
        return nao_logado();
    }
    if body["descricao"].as_str().map_or(true, str::is_empty) {
        return erro(StatusCode::BAD_REQUEST, "Descrição é obrigatória");
    }
    s.next_id += 1;
    let id = s.next_id;
    let mut conta = body;
    conta["id"] = json!(id);
    if conta.get("status").is_none() {
        conta["status"] = json!("pendente");
    }
    s.contas.push(conta);
    (
        StatusCode::CREATED,
        Json(json!({ "mensagem": "Conta criada com sucesso!", "id": id })),
    )
        .into_response()
}

async fn atualizar(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = state.lock().unwrap();
    if !has_session(&s, &headers) {
        return nao_logado();
    }
    let Some(conta) = s.contas.iter_mut().find(|c| c["id"] == json!(id)) else {
        return erro(StatusCode::NOT_FOUND, "Conta não encontrada");
    };
    if let Value::Object(fields) = body {
        for (k, v) in fields {
            conta[k.as_str()] = v;
        }
    }
    mensagem("Conta atualizada com sucesso!")
}

async fn excluir(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut s = state.lock().unwrap();
    if !has_session(&s, &headers) {
        return nao_logado();
    }
    let before = s.contas.len();
    s.contas.retain(|c| c["id"] != json!(id));
    if s.contas.len() == before {
        return erro(StatusCode::NOT_FOUND, "Conta não encontrada");
    }
    mensagem("Conta deletada com sucesso!")
}
