use qsound_proc_macros::{FakeDecode, FakeEncode};

#[derive(Debug, FakeEncode, FakeDecode)]
struct Transient {
    buffer: Vec<u8>,
}

impl Default for Transient {
    fn default() -> Self {
        Self { buffer: vec![0xAA] }
    }
}

#[test]
fn encodes_nothing_and_decodes_default() {
    let config = bincode::config::standard();

    let bytes = bincode::encode_to_vec(Transient { buffer: vec![1, 2, 3] }, config)
        .expect("FakeEncode should not fail");
    assert!(bytes.is_empty());

    let (decoded, read) = bincode::decode_from_slice::<Transient, _>(&bytes, config)
        .expect("FakeDecode should not fail");
    assert_eq!(read, 0);
    assert_eq!(decoded.buffer, [0xAA]);
}

#[derive(FakeEncode, FakeDecode)]
struct Wrapper<T: Default>(T);

impl<T: Default> Default for Wrapper<T> {
    fn default() -> Self {
        Self(T::default())
    }
}

#[test]
fn generic_types() {
    let config = bincode::config::standard();

    let bytes = bincode::encode_to_vec(Wrapper(42_u32), config).unwrap();
    let (decoded, _): (Wrapper<u32>, usize) = bincode::borrow_decode_from_slice(&bytes, config)
        .unwrap();
    assert_eq!(decoded.0, 0);
}
