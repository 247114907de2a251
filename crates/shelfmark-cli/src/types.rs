use clap::ValueEnum;
use shelfmark_types::{DatePreset, SortField, StatusFilter};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum StatusArg {
    All,
    Unread,
    Reading,
    Completed,
    Archived,
}

impl fmt::Display for StatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusArg::All => write!(f, "all"),
            StatusArg::Unread => write!(f, "unread"),
            StatusArg::Reading => write!(f, "reading"),
            StatusArg::Completed => write!(f, "completed"),
            StatusArg::Archived => write!(f, "archived"),
        }
    }
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => StatusFilter::All,
            StatusArg::Unread => StatusFilter::Unread,
            StatusArg::Reading => StatusFilter::Reading,
            StatusArg::Completed => StatusFilter::Completed,
            StatusArg::Archived => StatusFilter::Archived,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum SortArg {
    Created,
    Updated,
    Title,
    Duration,
}

impl fmt::Display for SortArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortArg::Created => write!(f, "created"),
            SortArg::Updated => write!(f, "updated"),
            SortArg::Title => write!(f, "title"),
            SortArg::Duration => write!(f, "duration"),
        }
    }
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Created => SortField::CreatedAt,
            SortArg::Updated => SortField::UpdatedAt,
            SortArg::Title => SortField::Title,
            SortArg::Duration => SortField::DurationEstimate,
        }
    }
}

/// Relative date windows resolved against the current time
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum WithinArg {
    Today,
    Week,
    Month,
    Year,
}

impl fmt::Display for WithinArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WithinArg::Today => write!(f, "today"),
            WithinArg::Week => write!(f, "week"),
            WithinArg::Month => write!(f, "month"),
            WithinArg::Year => write!(f, "year"),
        }
    }
}

impl From<WithinArg> for DatePreset {
    fn from(arg: WithinArg) -> Self {
        match arg {
            WithinArg::Today => DatePreset::Today,
            WithinArg::Week => DatePreset::Last7Days,
            WithinArg::Month => DatePreset::Last30Days,
            WithinArg::Year => DatePreset::ThisYear,
        }
    }
}
