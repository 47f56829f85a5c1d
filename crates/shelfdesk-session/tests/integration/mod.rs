mod borrow_options;
mod borrow_save;
