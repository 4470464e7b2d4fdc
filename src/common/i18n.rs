// src/common/i18n.rs

use std::{collections::HashMap, sync::LazyLock};

// Idioma usado quando o cliente não manda Accept-Language ou pede um que não temos.
pub const DEFAULT_LANG: &str = "es";

// Catálogos embutidos no binário.
const CATALOGS: &[(&str, &str)] = &[
    ("es", include_str!("../../locales/es.json")),
    ("en", include_str!("../../locales/en.json")),
    ("pt", include_str!("../../locales/pt.json")),
];

static GLOBAL: LazyLock<I18nStore> = LazyLock::new(I18nStore::load);

/// Mensagens traduzidas indexadas por idioma e chave.
#[derive(Debug, Clone, Default)]
pub struct I18nStore {
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl I18nStore {
    /// Carrega os catálogos embutidos. Um catálogo malformado é ignorado (e logado)
    /// para não derrubar o servidor por causa de uma tradução.
    pub fn load() -> Self {
        let mut catalogs = HashMap::new();
        for (lang, raw) in CATALOGS {
            match serde_json::from_str::<HashMap<String, String>>(raw) {
                Ok(messages) => {
                    catalogs.insert(lang.to_string(), messages);
                }
                Err(e) => tracing::error!("Catálogo de idioma '{}' inválido: {}", lang, e),
            }
        }
        Self { catalogs }
    }

    /// Instância compartilhada, para quem não tem acesso ao AppState.
    pub fn global() -> &'static I18nStore {
        &GLOBAL
    }

    /// Traduz `key` para `lang`. Cai para o idioma padrão e, por fim, devolve a própria chave.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.catalogs
            .get(lang)
            .and_then(|messages| messages.get(key))
            .or_else(|| {
                self.catalogs
                    .get(DEFAULT_LANG)
                    .and_then(|messages| messages.get(key))
            })
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_has_the_same_keys() {
        let store = I18nStore::load();
        let base = &store.catalogs[DEFAULT_LANG];
        for (lang, _) in CATALOGS {
            let catalog = &store.catalogs[*lang];
            for key in base.keys() {
                assert!(catalog.contains_key(key), "'{lang}' sem a chave '{key}'");
            }
        }
    }

    #[test]
    fn falls_back_to_default_language_then_key() {
        let store = I18nStore::load();
        assert_eq!(
            store.translate("de", "user.not_found"),
            store.translate(DEFAULT_LANG, "user.not_found")
        );
        assert_eq!(store.translate("en", "no.such.key"), "no.such.key");
    }

    #[test]
    fn translates_per_language() {
        let store = I18nStore::global();
        assert_ne!(
            store.translate("en", "auth.invalid_credentials"),
            store.translate("es", "auth.invalid_credentials")
        );
    }
}
