// src/common/validation.rs

//! Validações de formulário: e-mail, telefone e documentos brasileiros (CPF/CNPJ).

use validator::{ValidateEmail, ValidationError};

const CPF_LEN: usize = 11;
const CNPJ_LEN: usize = 14;

const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Remove a máscara: "123.456.789-09" -> "12345678909"
pub fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

// Documento aceita só dígitos e a pontuação da máscara.
fn is_masked_number(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || ".-/".contains(c))
}

fn to_digits(value: &str) -> Vec<u32> {
    value.chars().filter_map(|c| c.to_digit(10)).collect()
}

// Sequências como 000.000.000-00 passam no módulo 11, mas não existem.
fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

pub fn validate_email(value: &str) -> bool {
    value.trim() == value && value.validate_email()
}

/// Telefone brasileiro: 10 dígitos (fixo) ou 11 (celular), com DDD.
/// Aceita o prefixo do país (+55) e qualquer pontuação usual.
pub fn validate_phone(value: &str) -> bool {
    if value
        .chars()
        .any(|c| !(c.is_ascii_digit() || " ()-+.".contains(c)))
    {
        return false;
    }

    let digits = only_digits(value);
    let national = match digits.len() {
        12 | 13 if digits.starts_with("55") => &digits[2..],
        _ => digits.as_str(),
    };

    matches!(national.len(), 10 | 11)
}

pub fn validate_cpf(value: &str) -> bool {
    if !is_masked_number(value) {
        return false;
    }
    let digits = to_digits(value);
    if digits.len() != CPF_LEN || all_same(&digits) {
        return false;
    }

    let check = |len: usize| -> u32 {
        let sum: u32 = digits[..len]
            .iter()
            .zip((2..=(len as u32 + 1)).rev())
            .map(|(d, w)| d * w)
            .sum();
        let rest = (sum * 10) % 11;
        if rest == 10 { 0 } else { rest }
    };

    check(9) == digits[9] && check(10) == digits[10]
}

pub fn validate_cnpj(value: &str) -> bool {
    if !is_masked_number(value) {
        return false;
    }
    let digits = to_digits(value);
    if digits.len() != CNPJ_LEN || all_same(&digits) {
        return false;
    }

    let check = |weights: &[u32]| -> u32 {
        let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
        let rest = sum % 11;
        if rest < 2 { 0 } else { 11 - rest }
    };

    check(&CNPJ_FIRST_WEIGHTS) == digits[12] && check(&CNPJ_SECOND_WEIGHTS) == digits[13]
}

/// CPF quando tem 11 dígitos, CNPJ quando tem 14.
pub fn validate_document(value: &str) -> bool {
    match only_digits(value).len() {
        CPF_LEN => validate_cpf(value),
        CNPJ_LEN => validate_cnpj(value),
        _ => false,
    }
}

pub fn format_cpf(value: &str) -> Option<String> {
    if !validate_cpf(value) {
        return None;
    }
    let d = only_digits(value);
    Some(format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11]))
}

pub fn format_cnpj(value: &str) -> Option<String> {
    if !validate_cnpj(value) {
        return None;
    }
    let d = only_digits(value);
    Some(format!(
        "{}.{}.{}/{}-{}",
        &d[0..2],
        &d[2..5],
        &d[5..8],
        &d[8..12],
        &d[12..14]
    ))
}

// --- Adaptadores para #[validate(custom(function = ...))] ---

pub fn cpf_or_cnpj(value: &str) -> Result<(), ValidationError> {
    if validate_document(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_document");
        err.message = Some("CPF ou CNPJ inválido.".into());
        Err(err)
    }
}

pub fn phone_number(value: &str) -> Result<(), ValidationError> {
    if validate_phone(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_phone");
        err.message = Some("Telefone deve ter DDD + 8 ou 9 dígitos.".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("ana.souza+suporte@empresa.com.br"));
        assert!(!validate_email("user@"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("sem-arroba.com"));
        assert!(!validate_email(" user@example.com"));
    }

    #[test]
    fn phone_digit_count() {
        assert!(validate_phone("(11) 98765-4321"));
        assert!(validate_phone("(11) 3456-7890"));
        assert!(validate_phone("+55 11 98765-4321"));
        assert!(!validate_phone("98765-4321"));
        assert!(!validate_phone("(11) 98765-43210"));
        assert!(!validate_phone("11 9876x4321"));
    }

    #[test]
    fn cpf_check_digits() {
        assert!(validate_cpf("529.982.247-25"));
        assert!(validate_cpf("12345678909"));
        assert!(!validate_cpf("529.982.247-24"));
        assert!(!validate_cpf("123.456.789-00"));
        assert!(!validate_cpf("1234567890"));
    }

    #[test]
    fn cpf_rejects_repeated_sequences() {
        for d in 0..=9 {
            let cpf = d.to_string().repeat(11);
            assert!(!validate_cpf(&cpf), "{cpf} deveria ser rejeitado");
        }
        assert!(!validate_cpf("111.111.111-11"));
    }

    #[test]
    fn cnpj_check_digits() {
        assert!(validate_cnpj("11.222.333/0001-81"));
        assert!(validate_cnpj("11222333000181"));
        assert!(!validate_cnpj("11.222.333/0001-80"));
        assert!(!validate_cnpj("11.111.111/1111-11"));
        assert!(!validate_cnpj("00000000000000"));
        assert!(!validate_cnpj("1122233300018"));
    }

    #[test]
    fn document_dispatches_on_length() {
        assert!(validate_document("529.982.247-25"));
        assert!(validate_document("11.222.333/0001-81"));
        assert!(!validate_document("123"));
        assert!(cpf_or_cnpj("111.111.111-11").is_err());
    }

    #[test]
    fn documents_with_letters_are_rejected() {
        assert!(!validate_cpf("52998224725abc"));
        assert!(!validate_cnpj("CNPJ 11.222.333/0001-81"));
        assert!(!validate_document("529.982.247-25x"));
        assert!(cpf_or_cnpj("5299822472a5").is_err());
        assert!(validate_document(" 529.982.247-25 "));
    }

    #[test]
    fn masks_valid_documents() {
        assert_eq!(format_cpf("52998224725").as_deref(), Some("529.982.247-25"));
        assert_eq!(
            format_cnpj("11222333000181").as_deref(),
            Some("11.222.333/0001-81")
        );
        assert_eq!(format_cpf("11111111111"), None);
    }
}
