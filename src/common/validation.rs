// src/common/validation.rs

use rust_decimal::Decimal;
use validator::ValidationError;

fn error(code: &'static str, message_key: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message_key.into());
    err
}

/// PIN do dispositivo: exatamente 4 dígitos ASCII.
pub fn validate_pin(pin: &str) -> Result<(), ValidationError> {
    if pin.len() == 4 && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(error("pin", "validation.pin"))
    }
}

/// Maior tamanho que cabe na coluna `users.phone`.
pub const PHONE_MAX_LEN: usize = 20;

/// Telefone: apenas dígitos (aceita '+', espaços e hífens como separadores), 7 a 15 dígitos
/// e no máximo `PHONE_MAX_LEN` caracteres no total.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.chars().count() > PHONE_MAX_LEN {
        return Err(error("phone", "validation.phone"));
    }
    let mut digits = 0;
    for (i, c) in phone.chars().enumerate() {
        match c {
            '0'..='9' => digits += 1,
            '+' if i == 0 => {}
            ' ' | '-' => {}
            _ => return Err(error("phone", "validation.phone")),
        }
    }
    if (7..=15).contains(&digits) {
        Ok(())
    } else {
        Err(error("phone", "validation.phone"))
    }
}

pub fn validate_mac_address(mac: &str) -> Result<(), ValidationError> {
    normalize_mac(mac)
        .map(|_| ())
        .ok_or_else(|| error("mac_address", "validation.mac_address"))
}

/// Preço unitário máximo aceito no carrinho (99 999 999.99).
pub fn max_price() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Preço de item: nunca negativo e no máximo `max_price()`.
pub fn validate_price(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = error("range", "validation.price");
        err.add_param("min".into(), &0.0);
        return Err(err);
    }
    if *val > max_price() {
        let mut err = error("range", "validation.price_max");
        err.add_param("max".into(), &max_price().to_string());
        return Err(err);
    }
    Ok(())
}

/// Texto obrigatório: só espaços conta como vazio.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("blank", "validation.required"))
    } else {
        Ok(())
    }
}

/// Aceita `aa:bb:cc:dd:ee:ff`, `AA-BB-CC-DD-EE-FF` ou `aabbccddeeff` e devolve
/// sempre a forma canônica `AA:BB:CC:DD:EE:FF`.
pub fn normalize_mac(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let hex: String = match raw.len() {
        12 => raw.to_string(),
        17 => {
            let bytes = raw.as_bytes();
            let sep = bytes[2];
            if sep != b':' && sep != b'-' {
                return None;
            }
            // Os separadores ficam nas posições 2, 5, 8, 11 e 14, todos iguais.
            for pos in [2, 5, 8, 11, 14] {
                if bytes[pos] != sep {
                    return None;
                }
            }
            raw.chars().filter(|c| *c != sep as char).collect()
        }
        _ => return None,
    };

    if hex.len() != 12 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let upper = hex.to_ascii_uppercase();
    let pairs: Vec<&str> = (0..6).map(|i| &upper[i * 2..i * 2 + 2]).collect();
    Some(pairs.join(":"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0000")]
    #[case("1234")]
    #[case("9876")]
    fn pin_accepts_four_digits(#[case] pin: &str) {
        assert!(validate_pin(pin).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("123")]
    #[case("12345")]
    #[case("12a4")]
    #[case("١٢٣٤")] // dígitos não-ASCII
    #[case(" 123")]
    fn pin_rejects_anything_else(#[case] pin: &str) {
        let err = validate_pin(pin).unwrap_err();
        assert_eq!(err.message.as_deref(), Some("validation.pin"));
    }

    #[rstest]
    #[case("aa:bb:cc:dd:ee:ff", "AA:BB:CC:DD:EE:FF")]
    #[case("AA-BB-CC-DD-EE-01", "AA:BB:CC:DD:EE:01")]
    #[case("a1b2c3d4e5f6", "A1:B2:C3:D4:E5:F6")]
    #[case("  24:6f:28:aa:10:0c ", "24:6F:28:AA:10:0C")]
    fn mac_is_normalized(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_mac(raw).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("aa:bb:cc:dd:ee")]
    #[case("aa:bb-cc:dd:ee:ff")]
    #[case("gg:bb:cc:dd:ee:ff")]
    #[case("aabbccddeef")]
    #[case("aa.bb.cc.dd.ee.ff")]
    fn mac_rejects_malformed(#[case] raw: &str) {
        assert!(normalize_mac(raw).is_none());
        assert!(validate_mac_address(raw).is_err());
    }

    #[rstest]
    #[case("5512345678", true)]
    #[case("+52 55 1234 5678", true)]
    #[case("55-1234-5678", true)]
    #[case("12345", false)]
    #[case("55 12ab 5678", false)]
    #[case("1+2345678", false)]
    #[case("+52 (55) 1234", false)]
    #[case("+52 55 1234 5678 901", true)] // 20 caracteres
    #[case("5 5 1 2 3 4 5 6 7 8 9 0 1 2 3", false)] // 15 dígitos, mas 29 caracteres
    #[case("55--12--34--56--78--90", false)]
    fn phone_format(#[case] phone: &str, #[case] ok: bool) {
        assert_eq!(validate_phone(phone).is_ok(), ok);
    }

    #[rstest]
    #[case(Decimal::ZERO, None)]
    #[case(Decimal::new(149990, 2), None)]
    #[case(Decimal::new(9_999_999_999, 2), None)]
    #[case(Decimal::new(-1, 2), Some("validation.price"))]
    #[case(Decimal::new(10_000_000_000, 2), Some("validation.price_max"))]
    #[case(Decimal::from_scientific("5e28").unwrap(), Some("validation.price_max"))]
    fn price_bounds(#[case] price: Decimal, #[case] expected: Option<&str>) {
        let result = validate_price(&price);
        assert_eq!(result.err().and_then(|e| e.message).as_deref(), expected);
    }

    #[rstest]
    #[case("Juan", true)]
    #[case(" x ", true)]
    #[case("", false)]
    #[case("   ", false)]
    #[case("\t\n", false)]
    fn blank_text_is_rejected(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(validate_not_blank(value).is_ok(), ok);
    }
}
