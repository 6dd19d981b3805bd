// ============================================================================
// NOTIFIER / NAVIGATOR - UI side effects the data layer may trigger
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "notice-success",
            NoticeLevel::Info => "notice-info",
            NoticeLevel::Warning => "notice-warning",
            NoticeLevel::Error => "notice-error",
        }
    }
}

/// Transient toast
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub level: NoticeLevel,
    /// `None` keeps the default auto-close delay
    pub auto_close_ms: Option<u32>,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level,
            auto_close_ms: None,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, message)
    }

    pub fn auto_close(mut self, ms: u32) -> Self {
        self.auto_close_ms = Some(ms);
        self
    }
}

pub trait Notifier {
    fn show(&self, notice: Notice);
}

pub trait Navigator {
    /// Navigate to `path` once `delay_ms` has elapsed
    fn navigate_after(&self, path: &str, delay_ms: u32);
}
