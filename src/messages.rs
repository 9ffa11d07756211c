//! User-facing message copy
//!
//! Menu texts are sent with Telegram's legacy `Markdown` parse mode, so
//! single `*` is bold and `_` is italic here.

use crate::navigation::{MenuNode, MenuTree};

pub const BUY_BUTTON_LABEL: &str = "🛒 اشترِ الآن";

pub const END_OF_LIST: &str = "🎊 *تم عرض جميع المنتجات*\n\n💫 _اختر قسم آخر أو عد إلى القائمة الرئيسية_";

pub const EMPTY_CATEGORY: &str = "📦 *لا توجد منتجات في هذا القسم حالياً*\n\n✨ جاري تحديث العروض قريباً!";

pub const TEMPORARY_ERROR: &str = "⚠️ *عذراً، حدث خطأ مؤقت*\nالرجاء المحاولة لاحقًا.";

pub const GUIDANCE: &str = "❌ خيار غير معروف. استخدم /start للبدء.";

/// Greeting for a local hour of day (0-23)
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "صباح الخير! 🌅",
        12..=17 => "مساء الخير! ☀️",
        _ => "مساء الخير! 🌙",
    }
}

pub fn root_menu(hour: u32) -> String {
    format!(
        "{}\n\n🎉 *مرحباً بك في متجرنا الإلكتروني!* 🌟\n\n✨ _اختر المنصة التي تريد استعراض عروضها:_",
        greeting(hour)
    )
}

pub fn platform_menu(platform_label: &str) -> String {
    format!("*مرحباً بك في {platform_label}!*\n\n🛍️ _اختر القسم الذي يهمك لعرض العروض الحصرية:_")
}

/// Text for a menu node; category nodes show their platform's menu
pub fn menu_text(node: &MenuNode, tree: &MenuTree, hour: u32) -> String {
    match node.platform_id().and_then(|id| tree.platform(id)) {
        Some(platform) => platform_menu(&platform.label),
        None => root_menu(hour),
    }
}

pub fn loading_products(category_label: &str) -> String {
    format!("🔄 *جاري تحميل المنتجات في {category_label}...*")
}

pub fn coming_soon(platform_label: &str, default_platform_label: Option<&str>) -> String {
    let mut text = format!(
        "{platform_label}\n\n🚧 *جاري التطوير*\n\n⚡ _هذه المنصة قيد التطوير حالياً_\n✨ ستكون متاحة قريباً بإذن الله"
    );
    if let Some(default) = default_platform_label {
        text.push_str(&format!("\n\n💎 _يمكنك تجربة منصة {default} الآن!_"));
    }
    text
}
