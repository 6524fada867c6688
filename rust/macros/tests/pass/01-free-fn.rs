use keti_macros::instrument;

#[instrument]
fn add(a: u32, b: u32) -> u32 {
    a + b
}

#[instrument]
fn checked(v: Option<u32>) -> Result<u32, &'static str> {
    let v = v.ok_or("missing")?;
    if v == 0 {
        return Err("zero");
    }
    Ok(v)
}

fn main() {
    assert_eq!(add(2, 3), 5);
    assert_eq!(checked(Some(4)), Ok(4));
    assert_eq!(checked(Some(0)), Err("zero"));
    assert_eq!(checked(None), Err("missing"));
}
