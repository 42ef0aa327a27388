use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Ru,
}

/// Translate a key into `lang`.
///
/// Status templates use `{prefix}` and `{n}` placeholders.
pub fn t(lang: Lang, key: &str) -> &'static str {
    let ru = lang == Lang::Ru;
    match key {
        // ── Menu ────────────────────────────────────────────
        "menu.hide_more" => if ru { "Скрыть больше" } else { "Hide More" },
        "menu.hide_less" => if ru { "Скрыть меньше" } else { "Hide Less" },

        // ── Status bar ──────────────────────────────────────
        "status.more_depth" => if ru { "HideMore: глубина {n}" } else { "HideMore: Depth {n}" },
        "status.less_depth" => if ru { "HideLess: глубина {n}" } else { "HideLess: Depth {n}" },
        "status.disabled" => if ru { "{prefix}: отключено" } else { "{prefix} Disabled" },
        "status.at_max" => if ru {
            "HideMore: достигнута максимальная глубина ({n})"
        } else {
            "HideMore: At Maximum Depth ({n})"
        },
        "status.nothing_hidden" => if ru { "{prefix}: ничего не скрыто" } else { "{prefix}: Nothing Hidden" },
        "status.nothing_to_hide" => if ru { "{prefix}: нечего скрывать" } else { "{prefix}: Nothing to Hide" },
        "status.reapplied" => if ru { "{prefix}: применено повторно ({n})" } else { "{prefix}: Reapplied ({n})" },
        "status.reapplied_after_save" => if ru {
            "{prefix}: глубина {n} восстановлена после сохранения"
        } else {
            "{prefix}: reapplied depth {n} after Save"
        },
        "status.hide_rest_disabled" => if ru {
            " (скрытие остальной модели отключено)"
        } else {
            " (hide rest disabled)"
        },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys_translated() {
        assert_eq!(t(Lang::En, "menu.hide_more"), "Hide More");
        assert_eq!(t(Lang::Ru, "menu.hide_less"), "Скрыть меньше");
    }

    #[test]
    fn test_unknown_key_fallback() {
        assert_eq!(t(Lang::En, "no.such.key"), "???");
    }

    #[test]
    fn test_lang_serde() {
        let lang: Lang = serde_json::from_str(r#""ru""#).unwrap();
        assert_eq!(lang, Lang::Ru);
    }
}
