mod merge_conflict_writes_markers;
mod merge_fast_forward;
mod merge_simple_divergence;
mod merge_refusals;
