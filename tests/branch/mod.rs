mod create_and_list_branches;
mod invalid_branch_requests_fail;
