//! pt-BR display formatting and form input parsing

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::ClientError;

/// BRL currency, e.g. `R$ 1.500,00` or `-R$ 10,50`.
pub fn formatar_valor(valor: Decimal) -> String {
    let mut abs = valor
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    abs.rescale(2);

    let texto = abs.to_string();
    let (inteiro, centavos) = texto.split_once('.').unwrap_or((texto.as_str(), "00"));

    let sinal = if valor.is_sign_negative() && !abs.is_zero() { "-" } else { "" };
    format!("{}R$ {},{}", sinal, agrupar_milhares(inteiro), centavos)
}

fn agrupar_milhares(digitos: &str) -> String {
    let mut out = String::with_capacity(digitos.len() + digitos.len() / 3);
    for (i, ch) in digitos.chars().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `dd/mm/aaaa`
pub fn formatar_data(data: NaiveDate) -> String {
    data.format("%d/%m/%Y").to_string()
}

/// First letter uppercased, rest untouched.
pub fn capitalizar(texto: &str) -> String {
    let mut chars = texto.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parses a typed amount. Accepts `1500`, `1500.00`, `1500,00` and `1.500,00`.
pub fn parse_valor(input: &str) -> Result<Decimal, ClientError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ClientError::InvalidInput("Valor é obrigatório".to_string()));
    }
    let invalido = || ClientError::InvalidInput(format!("Valor inválido: '{}'", s));
    let normalizado = match s.split_once(',') {
        Some((inteiro, fracao)) => {
            if fracao.contains([',', '.']) {
                return Err(invalido());
            }
            format!("{}.{}", sem_milhares(inteiro).ok_or_else(invalido)?, fracao)
        }
        None => s.to_string(),
    };
    Decimal::from_str(&normalizado)
        .or_else(|_| Decimal::from_scientific(&normalizado))
        .map_err(|_| invalido())
}

/// Removes `.` thousands separators from the integer part of a comma-decimal
/// amount. Groups after the first must have exactly three digits.
fn sem_milhares(inteiro: &str) -> Option<String> {
    let digitos = inteiro.trim_start_matches(['-', '+']);
    let sinal = &inteiro[..inteiro.len() - digitos.len()];
    let mut grupos = digitos.split('.');
    let primeiro = grupos.next().unwrap_or_default();
    if digitos.contains('.') && !(1..=3).contains(&primeiro.len()) {
        return None;
    }
    let mut out = format!("{}{}", sinal, primeiro);
    for grupo in grupos {
        if grupo.len() != 3 {
            return None;
        }
        out.push_str(grupo);
    }
    Some(out)
}

/// Accepts `aaaa-mm-dd` (wire format) or `dd/mm/aaaa`.
pub fn parse_data(input: &str) -> Result<NaiveDate, ClientError> {
    let s = input.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .map_err(|_| ClientError::InvalidInput(format!("Data inválida: '{}'", s)))
}
