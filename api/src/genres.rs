//! The upstream catalog's genre vocabulary, shared by discovery and
//! recommendations.

use crate::media::MediaKind;

/// Movie genre ids as assigned by the upstream catalog.
pub const MOVIE_GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Sci-Fi"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// Series genre ids. Overlapping ids (Animation, Comedy, ...) carry the
/// same labels as the movie table.
pub const TV_GENRES: &[(u32, &str)] = &[
    (10759, "Action & Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (10762, "Kids"),
    (9648, "Mystery"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
    (37, "Western"),
];

/// Resolves a genre id to its label, searching the movie table first.
pub fn label_for(id: u32) -> Option<&'static str> {
    MOVIE_GENRES
        .iter()
        .chain(TV_GENRES.iter())
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, label)| *label)
}

/// Resolves a label back to its id within one kind's vocabulary.
pub fn id_for(label: &str, kind: MediaKind) -> Option<u32> {
    let table = match kind {
        MediaKind::Movie => MOVIE_GENRES,
        MediaKind::Series => TV_GENRES,
    };
    table
        .iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(label))
        .map(|(id, _)| *id)
}

/// Maps a listing's genre ids to labels, silently dropping ids the
/// vocabulary does not know.
pub fn labels_for(ids: &[u32]) -> Vec<String> {
    ids.iter()
        .filter_map(|&id| label_for(id))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_ids_from_both_tables() {
        assert_eq!(label_for(878), Some("Sci-Fi"));
        assert_eq!(label_for(10765), Some("Sci-Fi & Fantasy"));
        assert_eq!(label_for(424242), None);
    }

    #[test]
    fn labels_resolve_to_kind_specific_ids() {
        assert_eq!(id_for("Sci-Fi", MediaKind::Movie), Some(878));
        assert_eq!(id_for("sci-fi & fantasy", MediaKind::Series), Some(10765));
        assert_eq!(id_for("Sci-Fi & Fantasy", MediaKind::Movie), None);
    }

    #[test]
    fn unknown_ids_are_dropped_from_label_lists() {
        assert_eq!(labels_for(&[28, 999999, 27]), vec!["Action", "Horror"]);
    }
}
