use bibtag::codec::{decode_afi, encode_afi};
use bibtag::types::Afi;
use bibtag::Error;

#[test]
fn deployed_values_roundtrip() -> anyhow::Result<()> {
    for value in ["7", "194"] {
        assert_eq!(decode_afi(encode_afi(value)?), value);
    }
    assert_eq!(Afi::new(encode_afi("194")?), Afi::CHECKED_OUT);
    Ok(())
}

#[test]
fn every_byte_roundtrips() -> anyhow::Result<()> {
    for b in 0..=u8::MAX {
        assert_eq!(encode_afi(&decode_afi(b))?, b);
    }
    Ok(())
}

#[test]
fn out_of_range_and_garbage() {
    for bad in ["256", "1000", "abc", "", "-1", "0x07", "7.0"] {
        assert!(
            matches!(encode_afi(bad), Err(Error::InvalidAfi(_))),
            "{:?} should be rejected",
            bad
        );
    }
}

#[test]
fn afi_from_str() {
    let afi: Afi = "7".parse().unwrap();
    assert_eq!(afi, Afi::CHECKED_IN);
    assert!("300".parse::<Afi>().is_err());
}
