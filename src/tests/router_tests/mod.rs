mod index_tests;
mod listing_tests;
mod lookup_tests;
