mod middleware_test;
mod slots_test;
mod test_utils;
