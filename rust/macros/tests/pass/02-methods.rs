use keti_macros::instrument;

trait Scan {
    fn next(&mut self) -> Option<u8>;
}

struct Counter {
    left: u8,
}

impl Scan for Counter {
    #[instrument]
    fn next(&mut self) -> Option<u8> {
        if self.left == 0 {
            return None;
        }
        self.left -= 1;
        Some(self.left)
    }
}

impl Counter {
    #[instrument]
    pub fn reset(&mut self, to: u8) {
        self.left = to;
    }
}

fn main() {
    let mut c = Counter { left: 2 };
    assert_eq!(c.next(), Some(1));
    assert_eq!(c.next(), Some(0));
    assert_eq!(c.next(), None);
    c.reset(1);
    assert_eq!(c.next(), Some(0));
}
