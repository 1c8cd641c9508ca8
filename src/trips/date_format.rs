use chrono::{DateTime, FixedOffset, Locale};

/// Renders dates in a locale's preferred short form (`%x`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DateFormat {
    locale: Locale,
}

impl DateFormat {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Accepts both BCP 47 (`en-US`) and POSIX (`en_US.UTF-8`) tags. A bare
    /// language (`de`) resolves to its home region, and `en` to `en_US`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.split(['.', '@']).next().unwrap_or(tag).replace('-', "_");
        if let Ok(locale) = Locale::try_from(tag.as_str()) {
            return Some(Self::new(locale));
        }
        if tag.is_empty() || tag.contains('_') {
            return None;
        }
        let regional = match tag.as_str() {
            "en" => "en_US".to_owned(),
            language => format!("{language}_{}", language.to_uppercase()),
        };
        Locale::try_from(regional.as_str()).ok().map(Self::new)
    }

    pub fn system() -> Self {
        match sys_locale::get_locale() {
            Some(tag) => Self::from_tag(&tag).unwrap_or_else(|| {
                log::warn!("Unsupported system locale {tag}, falling back to POSIX");
                Self::default()
            }),
            None => {
                log::info!("No system locale reported, using POSIX dates");
                Self::default()
            }
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Formats in the timestamp's own offset.
    pub fn format(&self, time: &DateTime<FixedOffset>) -> String {
        time.format_localized("%x", self.locale).to_string()
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::new(Locale::POSIX)
    }
}
