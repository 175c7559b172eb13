mod test_clear;
mod test_show;
mod test_upload;
