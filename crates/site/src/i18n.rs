//! Static bilingual string tables.
//!
//! The site ships exactly two languages. Lookup is a plain key match:
//! Arabic entries overlay the English base, and any key missing from the
//! Arabic table falls back to English. There is deliberately no
//! pluralization or locale-negotiation machinery - the tables are data and
//! the lookup is trivial.

use serde::Deserialize;

/// Display language, selected per request via `?lang=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Ar,
}

/// Query parameter carrying the language selection.
#[derive(Debug, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl Lang {
    /// Parse a query-string code; anything but `ar` is English.
    #[must_use]
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("ar") => Self::Ar,
            _ => Self::En,
        }
    }

    /// The code used in URLs and the `lang` attribute.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Text direction for the document root.
    #[must_use]
    pub const fn dir(self) -> &'static str {
        match self {
            Self::En => "ltr",
            Self::Ar => "rtl",
        }
    }

    /// The other language, for the header toggle.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }

    /// Label shown on the language toggle (names the *other* language).
    #[must_use]
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::En => "العربية",
            Self::Ar => "English",
        }
    }

    /// Look up a UI string, falling back to English for missing Arabic keys.
    #[must_use]
    pub fn t(self, key: &str) -> &'static str {
        if self == Self::Ar {
            if let Some(text) = arabic(key) {
                return text;
            }
        }
        english(key)
    }
}

/// English base table. Every key the templates use must appear here.
fn english(key: &str) -> &'static str {
    match key {
        "brand" => "Al-Khair",
        "nav_home" => "Home",
        "nav_projects" => "Projects",
        "nav_contact" => "Contact",
        "hero_title" => "Building with integrity",
        "hero_subtitle" => {
            "Contracting, supply, and financing services delivered with care across the region."
        }
        "hero_cta" => "Explore our projects",
        "about_title" => "Who we are",
        "about_body" => {
            "Al-Khair is a contracting, supply, and financing company with a portfolio of \
             completed works spanning construction, logistics, and community development."
        }
        "services_title" => "What we do",
        "service_contracting" => "Contracting",
        "service_contracting_body" => "General contracting and construction works, end to end.",
        "service_supply" => "Supply",
        "service_supply_body" => "Sourcing and supplying materials and equipment on schedule.",
        "service_financing" => "Financing",
        "service_financing_body" => "Flexible project financing tailored to each engagement.",
        "projects_title" => "Our projects",
        "projects_subtitle" => "A selection of recently completed and ongoing works.",
        "projects_empty" => "No projects to show yet.",
        "projects_error" => "The project listing is temporarily unavailable.",
        "load_more" => "Load more",
        "view_details" => "View details",
        "back_to_projects" => "Back to projects",
        "not_found_title" => "Project not found",
        "not_found_body" => "The project you are looking for does not exist or has been removed.",
        "contact_title" => "Get in touch",
        "contact_body" => "Reach out to discuss your next project.",
        "footer_rights" => "All rights reserved.",
        _ => "",
    }
}

/// Arabic overlay. A missing key here falls back to the English base.
fn arabic(key: &str) -> Option<&'static str> {
    let text = match key {
        "brand" => "الخير",
        "nav_home" => "الرئيسية",
        "nav_projects" => "المشاريع",
        "nav_contact" => "تواصل معنا",
        "hero_title" => "نبني بأمانة",
        "hero_subtitle" => "خدمات المقاولات والتوريد والتمويل بعناية في جميع أنحاء المنطقة.",
        "hero_cta" => "استعرض مشاريعنا",
        "about_title" => "من نحن",
        "about_body" => {
            "الخير شركة مقاولات وتوريد وتمويل تمتلك سجلاً من الأعمال المنجزة في البناء \
             والخدمات اللوجستية وتنمية المجتمع."
        }
        "services_title" => "ماذا نقدم",
        "service_contracting" => "المقاولات",
        "service_contracting_body" => "أعمال المقاولات العامة والإنشاءات من البداية إلى النهاية.",
        "service_supply" => "التوريد",
        "service_supply_body" => "توفير وتوريد المواد والمعدات في الموعد المحدد.",
        "service_financing" => "التمويل",
        "service_financing_body" => "تمويل مرن للمشاريع يناسب كل تعاقد.",
        "projects_title" => "مشاريعنا",
        "projects_subtitle" => "مجموعة مختارة من الأعمال المنجزة والجارية.",
        "projects_empty" => "لا توجد مشاريع لعرضها بعد.",
        "projects_error" => "قائمة المشاريع غير متاحة مؤقتاً.",
        "load_more" => "عرض المزيد",
        "view_details" => "عرض التفاصيل",
        "back_to_projects" => "العودة إلى المشاريع",
        "not_found_title" => "المشروع غير موجود",
        "not_found_body" => "المشروع الذي تبحث عنه غير موجود أو تمت إزالته.",
        "contact_title" => "تواصل معنا",
        "contact_body" => "راسلنا لمناقشة مشروعك القادم.",
        "footer_rights" => "جميع الحقوق محفوظة.",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Lang::from_code(Some("ar")), Lang::Ar);
        assert_eq!(Lang::from_code(Some("en")), Lang::En);
        assert_eq!(Lang::from_code(Some("fr")), Lang::En);
        assert_eq!(Lang::from_code(None), Lang::En);
    }

    #[test]
    fn test_direction_and_toggle() {
        assert_eq!(Lang::En.dir(), "ltr");
        assert_eq!(Lang::Ar.dir(), "rtl");
        assert_eq!(Lang::En.toggle(), Lang::Ar);
        assert_eq!(Lang::Ar.toggle(), Lang::En);
    }

    #[test]
    fn test_arabic_falls_back_to_english() {
        // Every overlay key resolves in Arabic.
        assert_eq!(Lang::Ar.t("nav_home"), "الرئيسية");
        // Unknown keys resolve to the English base (empty for truly unknown).
        assert_eq!(Lang::Ar.t("definitely-not-a-key"), "");
    }
}
