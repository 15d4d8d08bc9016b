pub const API_KEY_LEN: usize = 32;

pub fn is_valid_api_key(api_key: &str) -> bool {
    api_key.len() == API_KEY_LEN
}

// 64-bit Steam ids are 17 digits today; allow one more for headroom.
pub fn is_valid_steam_id(steam_id: &str) -> bool {
    (17..=18).contains(&steam_id.len()) && steam_id.bytes().all(|b| b.is_ascii_digit())
}

/// File name for an exported library, derived from the player's display name.
pub fn export_file_name(persona_name: Option<&str>) -> String {
    let stem = persona_name
        .map(sanitize_filename::sanitize)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "library".to_string());

    format!("{}.json", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steam_id_length_bounds() {
        assert!(!is_valid_steam_id("7656119796028793"));
        assert!(is_valid_steam_id("76561197960287930"));
        assert!(is_valid_steam_id("765611979602879301"));
        assert!(!is_valid_steam_id("7656119796028793012"));
        assert!(!is_valid_steam_id(""));
    }

    #[test]
    fn api_key_must_be_exact_length() {
        assert!(is_valid_api_key(&"A".repeat(32)));
        assert!(!is_valid_api_key(&"A".repeat(31)));
        assert!(!is_valid_api_key(&"A".repeat(33)));
    }

    #[test]
    fn export_file_name_strips_path_characters() {
        assert_eq!(export_file_name(Some("a/b:c")), "abc.json");
        assert_eq!(export_file_name(Some("Gabe")), "Gabe.json");
    }

    #[test]
    fn export_file_name_falls_back_when_empty() {
        assert_eq!(export_file_name(None), "library.json");
        assert_eq!(export_file_name(Some("///")), "library.json");
    }
}
