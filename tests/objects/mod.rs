mod cat_file_prints_raw_content;
mod hash_object_uses_content_address;
