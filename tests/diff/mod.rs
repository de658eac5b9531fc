mod show_cached_diff;
