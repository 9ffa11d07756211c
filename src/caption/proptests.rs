//! Property-based tests for caption rendering

use super::*;
use crate::navigation::CategoryId;
use proptest::prelude::*;

fn arb_title() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{1,30}",
        "[_*\\[\\]()~`>#+\\-=|{}.!/\\\\a-z ]{1,40}",
        "\\PC{1,60}",
    ]
}

fn arb_product() -> impl Strategy<Value = ProductRecord> {
    (arb_title(), 0u32..100_000, prop_oneof![Just(0u32), 1u32..200_000]).prop_map(
        |(title, new_price, old_price)| {
            ProductRecord::new("p", &title, CategoryId::new("beauty"), f64::from(new_price), "https://e.com")
                .with_old_price(f64::from(old_price))
        },
    )
}

/// Undo [`escape_markdown_v2`], failing on a backslash that escapes nothing reserved
fn unescape(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            let next = chars.next()?;
            if !RESERVED_CHARS.contains(next) {
                return None;
            }
            out.push(next);
        } else {
            if RESERVED_CHARS.contains(c) {
                return None;
            }
            out.push(c);
        }
    }
    Some(out)
}

proptest! {
    /// Every reserved char is preceded by exactly one escape marker
    #[test]
    fn prop_escape_round_trips(title in arb_title()) {
        let escaped = escape_markdown_v2(&title);
        prop_assert_eq!(unescape(&escaped), Some(title));
    }

    /// Savings appear iff there is an old price, with the exact difference
    #[test]
    fn prop_savings_line_gated_by_old_price(product in arb_product()) {
        let plain = render_plain(&product, 1);
        let rich = render(&product, 1);

        if product.old_price > 0.0 {
            let expected = format!("وفرت: {}", format_price(product.old_price - product.new_price));
            prop_assert!(plain.text.contains(&expected));
            prop_assert!(rich.text.contains("~"));
        } else {
            prop_assert!(!plain.text.contains("وفرت"));
            prop_assert!(!rich.text.contains("وفرت"));
            prop_assert_eq!(rich.text.matches("السعر").count(), 1);
        }
    }

    /// The fallback never carries MarkdownV2 escapes or template markup
    #[test]
    fn prop_plain_caption_has_no_escapes(product in arb_product(), index in 1usize..4) {
        let plain = render_plain(&product, index);
        let template_only = plain.text.replace(&product.title, "");
        prop_assert!(!template_only.contains('\\'));
        prop_assert!(!template_only.contains('*'));
        prop_assert!(!template_only.contains('~'));
        prop_assert!(!template_only.contains("➡️"));
    }

    /// Captions are never empty and always fit Telegram's limit
    #[test]
    fn prop_caption_fits_limit(product in arb_product(), index in 1usize..4) {
        for caption in [render(&product, index), render_plain(&product, index)] {
            prop_assert!(!caption.text.is_empty());
            prop_assert!(caption.text.chars().count() <= MAX_CAPTION_CHARS);
        }
    }
}
