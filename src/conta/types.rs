//! Conta type definitions

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned identifier
pub type ContaId = i64;

/// Status the backend assigns when none is given
pub const STATUS_PADRAO: &str = "pendente";

/// Status values the backend is known to use. Not enforced.
pub const STATUS_SUGERIDOS: [&str; 3] = ["pendente", "pago", "recebido"];

/// A bill or invoice as returned by the backend
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Conta {
    pub id: ContaId,
    pub descricao: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub valor: Decimal,
    pub data_vencimento: NaiveDate,
    pub tipo: Tipo,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_criacao: Option<String>,
}

/// Payable or receivable
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tipo {
    Pagar,
    Receber,
}

impl Tipo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tipo::Pagar => "pagar",
            Tipo::Receber => "receber",
        }
    }

    /// Human label shown in the table
    pub fn rotulo(&self) -> &'static str {
        match self {
            Tipo::Pagar => "A Pagar",
            Tipo::Receber => "A Receber",
        }
    }

    /// Style class for the value cell. Receivables read as positive,
    /// payables as negative, whatever the sign of the amount.
    pub fn classe_valor(&self) -> &'static str {
        match self {
            Tipo::Receber => "valor-positivo",
            Tipo::Pagar => "valor-negativo",
        }
    }
}

impl fmt::Display for Tipo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tipo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pagar" => Ok(Tipo::Pagar),
            "receber" => Ok(Tipo::Receber),
            other => Err(format!("Tipo inválido: '{}'", other)),
        }
    }
}

/// Body of POST /contas and PUT /contas/{id}
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ContaPayload {
    pub descricao: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub valor: Decimal,
    pub data_vencimento: NaiveDate,
    pub tipo: Tipo,
    pub status: String,
}

impl From<&Conta> for ContaPayload {
    fn from(conta: &Conta) -> Self {
        Self {
            descricao: conta.descricao.clone(),
            valor: conta.valor,
            data_vencimento: conta.data_vencimento,
            tipo: conta.tipo,
            status: conta.status.clone(),
        }
    }
}

/// Body of POST /login and POST /registrar
#[derive(Serialize, Clone, Debug)]
pub struct Credenciais {
    pub username: String,
    pub password: String,
}

/// `{mensagem}` on success, `{erro}` on failure. Creation also carries the new id.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct MensagemResponse {
    #[serde(default)]
    pub mensagem: Option<String>,
    #[serde(default)]
    pub erro: Option<String>,
    #[serde(default)]
    pub id: Option<ContaId>,
}
