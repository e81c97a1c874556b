//! The fixed set of relics on display and their derived names.

/// One gallery entry: a static image asset and the title shown with it.
#[derive(Clone, Copy, Debug)]
pub struct RelicEntry {
    pub image: &'static str,
    pub title: &'static str,
}

pub const RELICS: [RelicEntry; 6] = [
    RelicEntry {
        image: "assets/relics/ancient-coin.png",
        title: "The Ancient Coin",
    },
    RelicEntry {
        image: "assets/relics/star-chart.png",
        title: "The Star Chart",
    },
    RelicEntry {
        image: "assets/relics/handwritten-log.png",
        title: "The Handwritten Log",
    },
    RelicEntry {
        image: "assets/relics/signal-fragment.png",
        title: "The Signal Fragment",
    },
    RelicEntry {
        image: "assets/relics/custodian-portrait.png",
        title: "The Custodian Portrait",
    },
    RelicEntry {
        image: "assets/relics/deep-relay-map.png",
        title: "The Deep Relay Map",
    },
];

#[inline]
pub fn next_index(index: usize) -> usize {
    (index + 1) % RELICS.len()
}

/// Filename offered by the download control: lowercased title with
/// whitespace runs collapsed to single dashes.
pub fn download_filename(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars() {
        if ch.is_whitespace() {
            pending_dash = !slug.is_empty();
        } else {
            if pending_dash {
                slug.push('-');
                pending_dash = false;
            }
            for lc in ch.to_lowercase() {
                slug.push(lc);
            }
        }
    }
    format!("relic-{slug}.png")
}
