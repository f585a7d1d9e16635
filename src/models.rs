use std::fmt;

/// Opaque OS window identifier.
///
/// Zero is the platform's null handle and is the only value treated as
/// invalid up front; any other handle may still have gone stale by the
/// time it is used, so callers re-resolve instead of caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(isize);

impl WindowHandle {
    pub const INVALID: WindowHandle = WindowHandle(0);

    pub fn from_raw(raw: isize) -> Self {
        WindowHandle(raw)
    }

    pub fn raw(self) -> isize {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self != WindowHandle::INVALID
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// One visible, titled top-level window and the process that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub label: String,
    pub process_name: String,
    pub handle: WindowHandle,
}

/// Display label -> process name, one entry per process, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationIndex {
    entries: Vec<(String, String)>,
}

impl ApplicationIndex {
    /// Builds the index from already deduplicated records.
    ///
    /// Two processes whose first windows share a title would otherwise
    /// collapse into one entry, so the later one is labelled with its
    /// process name as well, plus a counter if that label is taken too.
    pub fn from_records(records: &[WindowRecord]) -> Self {
        let mut entries: Vec<(String, String)> = Vec::with_capacity(records.len());

        for record in records {
            if entries.iter().any(|(_, process)| *process == record.process_name) {
                continue;
            }

            let taken = |candidate: &str| entries.iter().any(|(label, _)| label == candidate);
            let mut label = record.label.clone();
            if taken(&label) {
                label = format!("{} ({})", record.label, record.process_name);
            }
            let mut n = 2;
            while taken(&label) {
                label = format!("{} ({}) #{}", record.label, record.process_name, n);
                n += 1;
            }

            entries.push((label, record.process_name.clone()));
        }

        ApplicationIndex { entries }
    }

    pub fn process_for(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, process)| process.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetResolution {
    pub width: u32,
    pub height: u32,
}

impl TargetResolution {
    pub fn new(width: u32, height: u32) -> Self {
        TargetResolution { width, height }
    }
}

impl fmt::Display for TargetResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedResolution {
    Parsed(TargetResolution),
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLookup {
    Found(WindowHandle),
    NotFound,
}

/// Style bits of one window before and after a single write, plus what
/// the write was meant to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleMutation {
    pub before: u32,
    pub intended: u32,
    pub confirmed: u32,
}

impl StyleMutation {
    pub fn matches(&self) -> bool {
        self.intended == self.confirmed
    }
}
