use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ParsedResolution, TargetResolution};

pub const DEFAULT_RESOLUTION: TargetResolution = TargetResolution {
    width: 2560,
    height: 1440,
};

static RESOLUTION_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,5})\s*[xX×]\s*(\d{1,5})\s*$").ok());

/// Resolutions sharing one aspect ratio, shown as a submenu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AspectFamily {
    pub name: String,
    pub resolutions: Vec<TargetResolution>,
}

fn family(name: &str, sizes: &[(u32, u32)]) -> AspectFamily {
    AspectFamily {
        name: name.to_string(),
        resolutions: sizes
            .iter()
            .map(|&(w, h)| TargetResolution::new(w, h))
            .collect(),
    }
}

pub fn standard_catalog() -> Vec<AspectFamily> {
    vec![
        family(
            "16:9",
            &[
                (1280, 720),
                (1366, 768),
                (1600, 900),
                (1920, 1080),
                (2560, 1440),
                (3200, 1800),
                (3840, 2160),
                (5120, 2880),
                (7680, 4320),
            ],
        ),
        family(
            "21:9",
            &[(2560, 1080), (3440, 1440), (3840, 1600), (5120, 2160)],
        ),
        family("32:9", &[(3840, 1080), (5120, 1440), (7680, 2160)]),
    ]
}

/// The standard families plus a "Custom" family built from user
/// supplied strings. Unparsable entries are dropped with a warning.
pub fn catalog_with_custom(custom: &[String]) -> Vec<AspectFamily> {
    let mut catalog = standard_catalog();

    let extra: Vec<TargetResolution> = custom
        .iter()
        .filter_map(|text| match parse_resolution(text) {
            ParsedResolution::Parsed(res) => Some(res),
            ParsedResolution::Invalid(bad) => {
                log::warn!("Ignoring custom resolution {:?}", bad);
                None
            }
        })
        .collect();

    if !extra.is_empty() {
        catalog.push(AspectFamily {
            name: "Custom".to_string(),
            resolutions: extra,
        });
    }

    catalog
}

pub fn parse_resolution(text: &str) -> ParsedResolution {
    let Some(re) = RESOLUTION_RE.as_ref() else {
        return ParsedResolution::Invalid(text.to_string());
    };

    let parsed = re.captures(text).and_then(|cap| {
        let width: u32 = cap[1].parse().ok()?;
        let height: u32 = cap[2].parse().ok()?;
        (width > 0 && height > 0).then(|| TargetResolution::new(width, height))
    });

    match parsed {
        Some(res) => ParsedResolution::Parsed(res),
        None => ParsedResolution::Invalid(text.to_string()),
    }
}
