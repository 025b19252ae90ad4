#[macro_use]
extern crate afl;

fn main() {
    fuzz!(|data: &[u8]| {
        vw_pretty_fuzz::test(data);
    });
}
