//! Client-side filtering over the loaded snapshot. Nothing here is sent to the server.

use super::types::{Conta, Tipo};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filtro {
    pub tipo: Option<Tipo>,
    pub status: Option<String>,
}

impl Filtro {
    /// Empty or missing values match everything.
    pub fn matches(&self, conta: &Conta) -> bool {
        let tipo_ok = self.tipo.map_or(true, |t| conta.tipo == t);
        let status_ok = match self.status.as_deref() {
            None | Some("") => true,
            Some(s) => conta.status == s,
        };
        tipo_ok && status_ok
    }

    pub fn apply<'a>(&self, contas: &'a [Conta]) -> Vec<&'a Conta> {
        contas.iter().filter(|c| self.matches(c)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tipo.is_none() && self.status.as_deref().map_or(true, str::is_empty)
    }
}
