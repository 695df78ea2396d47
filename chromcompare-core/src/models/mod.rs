pub mod column;
pub mod region;
pub mod track;

// re-export for cleaner imports
pub use self::column::{Column, NamedColumns, RawColumn};
pub use self::region::RegionOfInterest;
pub use self::track::{
    BoundedPositionTrack, Bases, Bounds, ColumnGroup, IntervalTrack, PositionTrack, Score, Spans,
    Track, ensure_aligned, positions_equal,
};
