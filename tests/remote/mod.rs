mod fetch_copies_branches;
mod push_fast_forwards_remote;
