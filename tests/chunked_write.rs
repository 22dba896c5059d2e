use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tenure::{BulkWriter, Cell, ChunkPolicy, MemoryStore, Pacer, WriteState};

/// Pacer that records pauses into a shared log instead of sleeping.
#[derive(Debug, Default, Clone)]
struct RecordingPacer {
    pauses: Rc<RefCell<Vec<Duration>>>,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, delay: Duration) {
        self.pauses.borrow_mut().push(delay);
    }
}

fn grid(rows: usize, cols: usize) -> Vec<Vec<Cell>> {
    (0..rows)
        .map(|r| (0..cols).map(|c| Cell::text(format!("{r}:{c}"))).collect())
        .collect()
}

#[test]
fn wide_grid_is_written_in_cell_budget_chunks() {
    // 15000 cells / 50 columns = 300 rows per chunk; 10000 rows need
    // ceil(10000 / 300) = 34 writes, with a pause after all but the last.
    let policy = ChunkPolicy {
        max_cells_per_chunk: 15_000,
        min_rows_per_chunk: 100,
        inter_chunk_delay_ms: 200,
    };

    let pacer = RecordingPacer::default();
    let pauses = pacer.pauses.clone();
    let mut store = MemoryStore::new().with_sheet("Out", Vec::new());
    let mut writer = BulkWriter::with_pacer(policy, pacer);

    writer.write_grid(&mut store, "Out", &grid(10_000, 50)).unwrap();

    assert_eq!(store.write_count(), 34);
    assert_eq!(pauses.borrow().len(), 33);
    assert!(pauses
        .borrow()
        .iter()
        .all(|p| *p == Duration::from_millis(200)));
    assert_eq!(store.sheet("Out").unwrap().len(), 10_000);
    assert_eq!(*writer.state(), WriteState::Done);
}

#[test]
fn every_chunk_but_the_last_is_followed_by_the_configured_delay() {
    let policy = ChunkPolicy {
        max_cells_per_chunk: 100,
        min_rows_per_chunk: 10,
        inter_chunk_delay_ms: 200,
    };

    let pacer = RecordingPacer::default();
    let pauses = pacer.pauses.clone();
    let mut store = MemoryStore::new().with_sheet("Out", Vec::new());
    let mut writer = BulkWriter::with_pacer(policy, pacer);

    // 100 cells / 4 cols = 25 rows per chunk; 100 rows → 4 chunks.
    writer.write_grid(&mut store, "Out", &grid(100, 4)).unwrap();

    assert_eq!(store.write_count(), 4);
    assert_eq!(pauses.borrow().len(), 3);
}

#[test]
fn chunks_reassemble_the_exact_grid() {
    let policy = ChunkPolicy {
        max_cells_per_chunk: 6,
        min_rows_per_chunk: 1,
        inter_chunk_delay_ms: 0,
    };

    let source = grid(7, 3);
    let mut store = MemoryStore::new().with_sheet("Out", Vec::new());
    let mut writer = BulkWriter::with_pacer(policy, RecordingPacer::default());

    writer.write_grid(&mut store, "Out", &source).unwrap();

    assert_eq!(store.sheet("Out").unwrap(), &source);
    assert!(store.write_count() > 1);
}

#[test]
fn mid_write_failure_surfaces_the_failing_range_and_keeps_the_prefix() {
    let policy = ChunkPolicy {
        max_cells_per_chunk: 10,
        min_rows_per_chunk: 1,
        inter_chunk_delay_ms: 0,
    };

    let mut store = MemoryStore::new().with_sheet("Out", Vec::new());
    store.fail_writes_after(3);
    let mut writer = BulkWriter::with_pacer(policy, RecordingPacer::default());

    // 10 cells / 2 cols = 5 rows per chunk; the fourth chunk fails.
    let err = writer.write_grid(&mut store, "Out", &grid(40, 2)).unwrap_err();

    assert_eq!(err.failed_rows(), 15..20);
    assert_eq!(*writer.state(), WriteState::Failed { start: 15, end: 20 });
    // The committed prefix is still there; nothing past it was written.
    assert_eq!(store.sheet("Out").unwrap().len(), 15);
}
