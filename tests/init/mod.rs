mod reinit_keeps_current_branch;
