//! Rust types for custom database types.

use crate::utils::diesel::diesel_struct;

diesel_struct!(
    #[derive(Clone, PartialEq, Eq)]
    Substitution {
        pattern: String = Text,
        replacement: String = Text,
    }
);

impl From<lexio_api::request::NewSubstitution<'_>> for Substitution {
    fn from(value: lexio_api::request::NewSubstitution<'_>) -> Self {
        Self {
            pattern: value.pattern.into_owned(),
            replacement: value.replacement.into_owned(),
        }
    }
}

impl From<Substitution> for lexio::profile::Substitution {
    fn from(value: Substitution) -> Self {
        lexio::profile::Substitution::new(&value.pattern, &value.replacement)
    }
}

diesel_struct!(
    #[derive(Clone, PartialEq)]
    AudioAnchor {
        position_seconds: f64 = Double,
        text_offset: i32 = Integer,
    }
);

impl From<lexio_api::request::NewAudioAnchor> for AudioAnchor {
    fn from(value: lexio_api::request::NewAudioAnchor) -> Self {
        Self {
            position_seconds: value.position_seconds,
            text_offset: value.text_offset,
        }
    }
}

impl From<AudioAnchor> for lexio_api::response::AudioAnchor {
    fn from(value: AudioAnchor) -> Self {
        lexio_api::response::AudioAnchor {
            position_seconds: value.position_seconds,
            text_offset: value.text_offset,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn composite_types_map_to_their_sql_types() {
        fn assert_sql_mapping<ST, T>()
        where
            T: diesel::deserialize::FromSql<ST, diesel::pg::Pg>
                + diesel::serialize::ToSql<ST, diesel::pg::Pg>,
        {
        }
        assert_sql_mapping::<crate::schema::sql_types::Substitution, Substitution>();
        assert_sql_mapping::<crate::schema::sql_types::AudioAnchor, AudioAnchor>();
    }

    #[test]
    fn substitution_converts_to_profile_form() {
        let sub = Substitution {
            pattern: "\u{2019}".to_string(),
            replacement: "'".to_string(),
        };
        let profile_sub = lexio::profile::Substitution::from(sub.clone());
        assert_eq!(profile_sub.pattern, sub.pattern);
        assert_eq!(profile_sub.replacement, sub.replacement);
    }

    #[test]
    fn audio_anchor_converts_to_response_form() {
        let anchor = AudioAnchor {
            position_seconds: 12.5,
            text_offset: 240,
        };
        let res_anchor = lexio_api::response::AudioAnchor::from(anchor.clone());
        assert_eq!(res_anchor.position_seconds, 12.5);
        assert_eq!(res_anchor.text_offset, 240);
    }
}
