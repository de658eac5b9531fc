mod commit_records_parent_chain;
mod failed_add_leaves_index_unchanged;
