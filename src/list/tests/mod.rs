mod alloc;
mod cursor;
