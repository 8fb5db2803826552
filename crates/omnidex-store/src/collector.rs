//! Collector returning every matching document with its score.
//!
//! `TopDocs` needs a limit up front; ranking happens above the store, so
//! the store hands back all matches instead.

use tantivy::collector::{Collector, SegmentCollector};
use tantivy::{DocAddress, DocId, Score, SegmentOrdinal, SegmentReader};

/// Collects `(score, address)` for every matching document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoredDocs;

impl Collector for ScoredDocs {
    type Fruit = Vec<(Score, DocAddress)>;
    type Child = ScoredSegmentDocs;

    fn for_segment(
        &self,
        segment_local_id: SegmentOrdinal,
        _segment: &SegmentReader,
    ) -> tantivy::Result<ScoredSegmentDocs> {
        Ok(ScoredSegmentDocs {
            segment_ord: segment_local_id,
            docs: Vec::new(),
        })
    }

    fn requires_scoring(&self) -> bool {
        true
    }

    fn merge_fruits(
        &self,
        segment_fruits: Vec<Vec<(Score, DocAddress)>>,
    ) -> tantivy::Result<Self::Fruit> {
        Ok(segment_fruits.into_iter().flatten().collect())
    }
}

/// Per-segment half of [`ScoredDocs`].
#[derive(Debug)]
pub struct ScoredSegmentDocs {
    segment_ord: SegmentOrdinal,
    docs: Vec<(Score, DocAddress)>,
}

impl SegmentCollector for ScoredSegmentDocs {
    type Fruit = Vec<(Score, DocAddress)>;

    fn collect(&mut self, doc: DocId, score: Score) {
        self.docs.push((score, DocAddress::new(self.segment_ord, doc)));
    }

    fn harvest(self) -> Self::Fruit {
        self.docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tantivy::query::AllQuery;
    use tantivy::schema::{STRING, SchemaBuilder};
    use tantivy::{Index, TantivyDocument};

    #[test]
    fn test_collects_every_document() {
        let mut builder = SchemaBuilder::new();
        let name = builder.add_text_field("name", STRING);
        let index = Index::create_in_ram(builder.build());

        let mut writer = index.writer_with_num_threads(1, 15_000_000).unwrap();
        for n in ["a", "b", "c"] {
            let mut doc = TantivyDocument::new();
            doc.add_text(name, n);
            writer.add_document(doc).unwrap();
        }
        writer.commit().unwrap();

        let searcher = index.reader().unwrap().searcher();
        let docs = searcher.search(&AllQuery, &ScoredDocs).unwrap();
        assert_eq!(docs.len(), 3);
    }
}
