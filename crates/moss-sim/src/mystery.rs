//! Static mystery catalog, one list per track.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use moss_types::{Mystery, Track};

struct Entry {
    id: &'static str,
    title: &'static str,
    intro: &'static str,
    hints: &'static [&'static str],
    solution: &'static str,
}

const FUN: &[Entry] = &[
    Entry {
        id: "missing-snack",
        title: "The Case of the Missing Snack",
        intro: "*peers suspiciously at the moss* Someone ate my algae stash while I was curled up! \
                The only clues are tiny footprints and a trail of crumbs. Who did it?",
        hints: &[
            "The footprints have far too many legs to be yours.",
            "Whoever it was left a faint reflection in the water droplet.",
            "*checks own belly* ...it does feel rather full in here.",
        ],
        solution: "I ate it myself in my sleep!",
    },
    Entry {
        id: "cosmic-radio",
        title: "The Cosmic Radio",
        intro: "*antennae twitching* Every night a faint crackle comes from the sky over the moss. \
                It repeats in a pattern. What could be making it?",
        hints: &[
            "It only happens when the sky is clear.",
            "The pattern gets stronger right before dawn.",
            "It sounds a lot like a very distant, very old star spinning fast.",
        ],
        solution: "A pulsar",
    },
    Entry {
        id: "dream-maze",
        title: "The Dream Maze",
        intro: "*yawns* I keep dreaming of a maze where every wall is made of water, \
                yet I never get wet. What am I walking through?",
        hints: &[
            "The walls shimmer and float.",
            "You can see them best on cold mornings.",
            "They vanish when the sun gets warm.",
        ],
        solution: "Fog",
    },
];

const EDUCATIONAL: &[Entry] = &[
    Entry {
        id: "cryptobiosis",
        title: "How I Survive Almost Anything",
        intro: "*puffs up proudly* Did you know I can dry out into a little barrel and wait for years? \
                Ask me how it works!",
        hints: &[],
        solution: "Cryptobiosis: shutting down metabolism almost completely until conditions improve.",
    },
    Entry {
        id: "water-bears-in-space",
        title: "Water Bears in Space",
        intro: "Some of my cousins went to space and came back fine! Want to know how?",
        hints: &[],
        solution: "Dried-out tardigrades survived vacuum and radiation in low Earth orbit in 2007.",
    },
    Entry {
        id: "photosynthesis",
        title: "Where Moss Gets Its Lunch",
        intro: "*nibbles the moss* My home makes food out of light. Shall we find out how?",
        hints: &[],
        solution: "Photosynthesis turns light, water and carbon dioxide into sugar and oxygen.",
    },
    Entry {
        id: "water-cycle",
        title: "The Journey of a Droplet",
        intro: "The droplet I drink today might have been a cloud last week. Let's follow it!",
        hints: &[],
        solution: "Water evaporates, condenses into clouds, falls as precipitation and collects again.",
    },
    Entry {
        id: "surface-tension",
        title: "Walking on Water",
        intro: "Tiny creatures can stand on a droplet without sinking. What holds us up?",
        hints: &[],
        solution: "Surface tension: water molecules pull on each other and form an elastic skin.",
    },
    Entry {
        id: "microscopes",
        title: "Seeing the Very Small",
        intro: "Nobody knew about me until someone built a clever lens. How do microscopes work?",
        hints: &[],
        solution: "Lenses bend light to magnify an image far beyond what the eye can resolve.",
    },
    Entry {
        id: "extremophiles",
        title: "Life at the Edges",
        intro: "Some living things love boiling springs and frozen ice. Curious who they are?",
        hints: &[],
        solution: "Extremophiles thrive in extreme heat, cold, pressure, acidity or salt.",
    },
];

fn build(entries: &[Entry], track: Track) -> Vec<Mystery> {
    entries
        .iter()
        .map(|entry| Mystery {
            id: entry.id.to_owned(),
            title: entry.title.to_owned(),
            intro: entry.intro.to_owned(),
            hints: entry.hints.iter().map(|hint| (*hint).to_owned()).collect(),
            solution: entry.solution.to_owned(),
            track,
        })
        .collect()
}

static FUN_CATALOG: LazyLock<Vec<Mystery>> = LazyLock::new(|| build(FUN, Track::Fun));
static EDUCATIONAL_CATALOG: LazyLock<Vec<Mystery>> =
    LazyLock::new(|| build(EDUCATIONAL, Track::Educational));

/// Every entry for a track.
pub fn catalog(track: Track) -> &'static [Mystery] {
    match track {
        Track::Fun => &FUN_CATALOG,
        Track::Educational => &EDUCATIONAL_CATALOG,
    }
}

/// Look up an entry by id within a track.
pub fn find(id: &str, track: Track) -> Option<&'static Mystery> {
    catalog(track).iter().find(|mystery| mystery.id == id)
}

/// Entries of a track not yet in the solved set.
pub fn available(track: Track, solved: &BTreeSet<String>) -> Vec<&'static Mystery> {
    catalog(track)
        .iter()
        .filter(|mystery| !solved.contains(&mystery.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fun_entries_have_three_hints() {
        assert!(!catalog(Track::Fun).is_empty());
        for mystery in catalog(Track::Fun) {
            assert_eq!(mystery.hints.len(), 3, "{}", mystery.id);
            assert_eq!(mystery.track, Track::Fun);
        }
    }

    #[test]
    fn educational_entries_have_no_hints() {
        for mystery in catalog(Track::Educational) {
            assert!(mystery.hints.is_empty(), "{}", mystery.id);
            assert!(!mystery.solution.is_empty());
        }
    }

    #[test]
    fn lookup_is_scoped_to_track() {
        assert!(find("dream-maze", Track::Fun).is_some());
        assert!(find("dream-maze", Track::Educational).is_none());
        assert!(find("no-such-thing", Track::Fun).is_none());
    }

    #[test]
    fn solved_entries_drop_out_of_available() {
        let total = catalog(Track::Fun).len();
        let solved: BTreeSet<String> = ["cosmic-radio".to_owned()].into();
        let open = available(Track::Fun, &solved);
        assert_eq!(open.len(), total.saturating_sub(1));
        assert!(open.iter().all(|mystery| mystery.id != "cosmic-radio"));
    }

    #[test]
    fn ids_are_unique_per_track() {
        for track in [Track::Fun, Track::Educational] {
            let ids: BTreeSet<&str> = catalog(track).iter().map(|m| m.id.as_str()).collect();
            assert_eq!(ids.len(), catalog(track).len());
        }
    }
}
