// Suporte a atualização parcial (PUT com merge campo a campo).
//
// Campo ausente no JSON  -> None        -> valor armazenado intacto
// Campo `null` no JSON   -> Some(None)  -> coluna anulável é limpa
// Campo com valor        -> Some(Some(v))

use serde::{Deserialize, Deserializer};

/// Usado com `#[serde(default, deserialize_with = "nullable")]` em campos `Option<Option<T>>`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Sobrescreve `slot` somente quando o patch trouxe o campo.
pub fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        nome: Option<String>,
        #[serde(default, deserialize_with = "nullable")]
        email: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_distinguished() {
        let absent: Patch = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(absent.email, None);

        let null: Patch = serde_json::from_str(r#"{"email": null}"#).unwrap();
        assert_eq!(null.email, Some(None));

        let value: Patch = serde_json::from_str(r#"{"email": "a@b.c"}"#).unwrap();
        assert_eq!(value.email, Some(Some("a@b.c".to_string())));
    }

    #[test]
    fn set_only_touches_present_fields() {
        let patch: Patch = serde_json::from_str(r#"{"email": null}"#).unwrap();

        let mut nome = "Ana".to_string();
        let mut email = Some("ana@x.com".to_string());
        set(&mut nome, patch.nome);
        set(&mut email, patch.email);

        assert_eq!(nome, "Ana");
        assert_eq!(email, None);
    }
}
