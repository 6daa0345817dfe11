use crate::catalog::{ArtistId, ArtistProvider};
use crate::labels::{LabelKey, PluralFormatter};

/// Pre-formatted text for one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayRecord {
    pub item_id: ArtistId,
    /// Artist name.
    pub line_one: String,
    /// Album count label.
    pub line_two: String,
    /// Song count label.
    pub line_three: String,
}

/// Row display data computed in one pass over the backing sequence.
///
/// Index-aligned with the provider it was built from: a null backing entry
/// leaves an empty slot at the same index instead of shifting later rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayCache {
    records: Vec<Option<DisplayRecord>>,
}

impl DisplayCache {
    /// Build records for every entry of `provider`.
    pub fn build<P, F>(provider: &P, formatter: &F, secondary: LabelKey, tertiary: LabelKey) -> Self
    where
        P: ArtistProvider + ?Sized,
        F: PluralFormatter + ?Sized,
    {
        let count = provider.count();
        let mut records = Vec::with_capacity(count);
        for i in 0..count {
            records.push(provider.item_at(i).map(|artist| DisplayRecord {
                item_id: artist.id,
                line_one: artist.name.clone(),
                line_two: formatter.format_plural(secondary, artist.album_count),
                line_three: formatter.format_plural(tertiary, artist.song_count),
            }));
        }
        Self { records }
    }

    /// Record at `position`; `None` for empty slots and out-of-range positions.
    pub fn get(&self, position: usize) -> Option<&DisplayRecord> {
        self.records.get(position).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Option<DisplayRecord>] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Artist;
    use crate::labels::{Labels, PluralTemplate};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn uniform_labels() -> Labels {
        Labels {
            albums: PluralTemplate::uniform("%d albums"),
            songs: PluralTemplate::uniform("%d songs"),
        }
    }

    fn build(backing: &Vec<Option<Artist>>) -> DisplayCache {
        DisplayCache::build(backing, &uniform_labels(), LabelKey::Albums, LabelKey::Songs)
    }

    #[test]
    fn test_single_artist_scenario() {
        let backing = vec![Some(Artist::new(1, "Artist A", 3, 12))];
        let cache = build(&backing);
        assert_eq!(
            cache.records(),
            &[Some(DisplayRecord {
                item_id: 1,
                line_one: "Artist A".to_string(),
                line_two: "3 albums".to_string(),
                line_three: "12 songs".to_string(),
            })]
        );
    }

    #[test]
    fn test_null_entry_keeps_alignment() {
        let backing = vec![
            Some(Artist::new(1, "A", 1, 1)),
            None,
            Some(Artist::new(3, "C", 2, 2)),
        ];
        let cache = build(&backing);
        assert_eq!(cache.len(), 3);
        assert!(cache.get(1).is_none());
        assert_eq!(cache.get(2).map(|r| r.item_id), Some(3));
    }

    #[test]
    fn test_get_out_of_range() {
        let cache = build(&vec![Some(Artist::new(1, "A", 1, 1))]);
        assert!(cache.get(1).is_none());
        assert!(DisplayCache::default().get(0).is_none());
    }

    #[test]
    fn test_label_keys_are_respected() {
        let backing = vec![Some(Artist::new(1, "A", 1, 5))];
        let cache = DisplayCache::build(
            &backing,
            &Labels::default(),
            LabelKey::Songs,
            LabelKey::Albums,
        );
        let rec = cache.get(0).unwrap();
        assert_eq!(rec.line_two, "1 song");
        assert_eq!(rec.line_three, "5 albums");
    }

    fn arb_backing() -> impl Strategy<Value = Vec<Option<Artist>>> {
        proptest::collection::vec(
            proptest::option::of(
                (any::<i64>(), "[a-zA-Z ]{0,12}", 0u32..500, 0u32..5000)
                    .prop_map(|(id, name, albums, songs)| Artist::new(id, name, albums, songs)),
            ),
            0..64,
        )
    }

    proptest! {
        #[test]
        fn prop_cache_is_index_aligned(backing in arb_backing()) {
            let cache = build(&backing);
            prop_assert_eq!(cache.len(), backing.len());
            for (i, entry) in backing.iter().enumerate() {
                match entry {
                    Some(artist) => {
                        let rec = cache.get(i).unwrap();
                        prop_assert_eq!(rec.item_id, artist.id);
                        prop_assert_eq!(&rec.line_one, &artist.name);
                    }
                    None => {
                        prop_assert!(cache.get(i).is_none());
                    }
                }
            }
        }

        #[test]
        fn prop_rebuild_is_idempotent(backing in arb_backing()) {
            prop_assert_eq!(build(&backing), build(&backing));
        }
    }
}
