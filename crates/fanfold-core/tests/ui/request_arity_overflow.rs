use fanfold_core::prelude::*;

// A typed request holds at most sixteen consumers; the seventeenth slot
// has no `Append` implementation.
fn main() {
    let _request = vec![1, 2, 3]
        .get_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count();
}
