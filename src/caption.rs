//! Product caption rendering
//!
//! Captions are built in two phases: leaf values (title, prices, savings)
//! are escaped first, then composed into a template whose own markup is
//! never escaped. The rich variant targets Telegram MarkdownV2; the plain
//! variant is the fallback used when a rich send is rejected.

use crate::catalog::ProductRecord;

#[cfg(test)]
mod proptests;

/// Characters MarkdownV2 requires to be escaped outside of entities
pub const RESERVED_CHARS: &str = "_*[]()~`>#+-=|{}.!/\\";

/// Telegram's caption limit, in characters
pub const MAX_CAPTION_CHARS: usize = 1024;

const CURRENCY: &str = "ريال";
const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormat {
    /// Escaped MarkdownV2
    Rich,
    /// No markup at all
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub text: String,
    pub format: CaptionFormat,
}

impl Caption {
    pub fn is_rich(&self) -> bool {
        self.format == CaptionFormat::Rich
    }
}

/// Template markup for one output format
struct Markup {
    format: CaptionFormat,
    bold: &'static str,
    strike: &'static str,
    arrow: &'static str,
    escape: fn(&str) -> String,
}

const RICH: Markup = Markup {
    format: CaptionFormat::Rich,
    bold: "*",
    strike: "~",
    arrow: "➡️",
    escape: escape_markdown_v2,
};

const PLAIN: Markup = Markup {
    format: CaptionFormat::Plain,
    bold: "",
    strike: "",
    arrow: "->",
    escape: str::to_string,
};

/// Prefix every reserved MarkdownV2 character with a backslash
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if RESERVED_CHARS.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Price as display text, e.g. `120 ريال` or `99.5 ريال`.
///
/// Display convention only; never parse it back.
pub fn format_price(value: f64) -> String {
    format!("{value} {CURRENCY}")
}

/// MarkdownV2 caption for the product at 1-based `index`
pub fn render(product: &ProductRecord, index: usize) -> Caption {
    render_with(product, index, &RICH)
}

/// Unescaped fallback caption: no emphasis, no strike-through, ASCII arrow
pub fn render_plain(product: &ProductRecord, index: usize) -> Caption {
    render_with(product, index, &PLAIN)
}

fn render_with(product: &ProductRecord, index: usize, markup: &Markup) -> Caption {
    let mut title = product.title.clone();
    let mut text = compose(product, index, &title, markup);

    // Shorten the title until the whole caption fits
    while text.chars().count() > MAX_CAPTION_CHARS && !title.is_empty() {
        let overflow = text.chars().count() - MAX_CAPTION_CHARS;
        let keep = title
            .trim_end_matches(ELLIPSIS)
            .chars()
            .count()
            .saturating_sub(overflow + 1);
        title = title.chars().take(keep).collect::<String>();
        if keep > 0 {
            title.push(ELLIPSIS);
        }
        text = compose(product, index, &title, markup);
    }

    Caption {
        text,
        format: markup.format,
    }
}

fn compose(product: &ProductRecord, index: usize, title: &str, markup: &Markup) -> String {
    let Markup {
        bold,
        strike,
        arrow,
        escape,
        ..
    } = markup;

    // Phase 1: escape leaves
    let title = escape(title);
    let new_price = escape(&format_price(product.new_price));

    // Phase 2: compose
    let mut caption = format!("{bold}🏷️ المنتج {index}: {title}{bold}\n\n");
    match product.savings() {
        Some(savings) => {
            let old_price = escape(&format_price(product.old_price));
            let savings = escape(&format_price(savings));
            caption.push_str(&format!(
                "💵 {bold}السعر:{bold}\n{strike}{old_price}{strike} {arrow} {bold}{new_price}{bold}\n"
            ));
            caption.push_str(&format!("💰 {bold}وفرت: {savings}{bold} 🎉"));
        }
        None => {
            caption.push_str(&format!("💵 {bold}السعر: {new_price}{bold}"));
        }
    }
    caption
}
