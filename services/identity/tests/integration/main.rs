mod account_test;
mod reset_test;
