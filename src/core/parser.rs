//! Best-effort parsing of guide fields.
//!
//! Guide feeds are loose about dates and episode numbering, so every parser
//! here returns `None` for anything it does not recognise:
//!
//! - Year from the `date` field (`2011`, `20110315`, `2011-03-15`)
//! - Season and episode from an XMLTV `season.episode.part` number
//!   (zero based, optional `/total`) or an on-screen `S02E05` style label

/// Parsed season/episode pair. Either side may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpisodeInfo {
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

impl EpisodeInfo {
    pub fn is_known(&self) -> bool {
        self.season.is_some() || self.episode.is_some()
    }
}

/// Parse the year from a date field.
pub fn parse_year(date: &str) -> Option<u16> {
    if let Ok(re) = regex::Regex::new(r"^\s*(\d{4})") {
        if let Some(caps) = re.captures(date) {
            if let Some(year) = caps.get(1).and_then(|m| m.as_str().parse::<u16>().ok()) {
                if year > 0 {
                    return Some(year);
                }
            }
        }
    }

    None
}

/// Parse season and episode from an episode number.
pub fn parse_episode_number(episode_number: &str) -> EpisodeInfo {
    let xmltv = parse_xmltv_ns(episode_number);
    if xmltv.is_known() {
        return xmltv;
    }

    parse_onscreen(episode_number)
}

/// XMLTV "xmltv_ns" notation: "1.4.0/1" is season 2, episode 5.
fn parse_xmltv_ns(value: &str) -> EpisodeInfo {
    let mut info = EpisodeInfo::default();

    if let Ok(re) =
        regex::Regex::new(r"^\s*(\d*)\s*(?:/\s*\d+)?\s*\.\s*(\d*)\s*(?:/\s*\d+)?\s*(?:\.|$)")
    {
        if let Some(caps) = re.captures(value) {
            let zero_based = |i: usize| {
                caps.get(i)
                    .and_then(|m| m.as_str().parse::<u32>().ok())
                    .and_then(|n| n.checked_add(1))
            };
            info.season = zero_based(1);
            info.episode = zero_based(2);
        }
    }

    info
}

/// On-screen notation: "S02E05", "S2 E5", "Season 2, Episode 5".
fn parse_onscreen(value: &str) -> EpisodeInfo {
    let mut info = EpisodeInfo::default();

    // Pattern: "S02E05", "s2 e5"
    if let Ok(re) = regex::Regex::new(r"(?i)\bs(\d{1,3})\s*e(\d{1,4})\b") {
        if let Some(caps) = re.captures(value) {
            info.season = caps.get(1).and_then(|m| m.as_str().parse().ok());
            info.episode = caps.get(2).and_then(|m| m.as_str().parse().ok());
            return info;
        }
    }

    // Pattern: "Season 2"
    if let Ok(re) = regex::Regex::new(r"(?i)\bseason\s*(\d{1,3})\b") {
        if let Some(caps) = re.captures(value) {
            info.season = caps.get(1).and_then(|m| m.as_str().parse().ok());
        }
    }

    // Pattern: "Episode 5", "Ep 5"
    if let Ok(re) = regex::Regex::new(r"(?i)\bep(?:isode)?\.?\s*(\d{1,4})\b") {
        if let Some(caps) = re.captures(value) {
            info.episode = caps.get(1).and_then(|m| m.as_str().parse().ok());
        }
    }

    info
}
