#[path = "../common/mod.rs"]
mod common;

use bibtag::tag::{read_tag, write_afi, write_mid};
use bibtag::transport::{MockCall, MockTransport, Transport};
use bibtag::types::{Afi, Uid};
use bibtag::Error;

#[test]
fn boxed_mock_reads_fixture_tag() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    mock.insert_raw_tag("E001", common::fixtures::sample_blocks());
    let mut transport: Box<dyn Transport> = Box::new(mock.clone());
    transport.connect()?;

    assert_eq!(transport.list_visible_uids()?, vec![Uid::from("E001")]);
    let tag = read_tag(transport.as_mut(), &Uid::from("E001"))?;
    assert_eq!(tag.mid(), &common::fixtures::sample_mid());
    assert_eq!(mock.block_reads(), 4);
    Ok(())
}

#[test]
fn written_mid_reads_back() -> anyhow::Result<()> {
    let mut mock = common::mock_with_tags(&[("E001", &common::fixtures::sample_mid())])?;
    mock.connect()?;
    let uid = Uid::from("E001");
    let new_mid = common::fixtures::series_mid(3, 2);

    write_mid(&mut mock, &uid, &new_mid)?;
    let tag = read_tag(&mut mock, &uid)?;
    assert_eq!(tag.mid(), &new_mid);
    assert_eq!(tag.series_length(), 3);
    assert_eq!(tag.number_in_series(), 2);
    Ok(())
}

#[test]
fn afi_write_recorded() -> anyhow::Result<()> {
    let mut mock = common::mock_with_tags(&[("E001", &common::fixtures::sample_mid())])?;
    mock.connect()?;
    mock.clear_calls();

    write_afi(&mut mock, &Uid::from("E001"), Afi::CHECKED_IN)?;
    assert_eq!(
        mock.calls(),
        vec![MockCall::WriteAfi(Uid::from("E001"), Afi::CHECKED_IN)]
    );
    assert_eq!(mock.afi_of("E001"), Some(Afi::CHECKED_IN));
    Ok(())
}

#[test]
fn failures_are_classified() -> anyhow::Result<()> {
    let mut mock = common::mock_with_tags(&[("E001", &common::fixtures::sample_mid())])?;

    // not connected: transport level
    let err = read_tag(&mut mock, &Uid::from("E001")).unwrap_err();
    assert!(matches!(err, Error::NotConnected));
    assert!(err.aborts_tick());

    mock.connect()?;
    mock.set_unreadable_block("E001", 1);
    let err = read_tag(&mut mock, &Uid::from("E001")).unwrap_err();
    assert!(matches!(err, Error::TagUnreadable { block: 1, .. }));
    assert!(!err.aborts_tick());

    mock.insert_raw_tag("E002", common::fixtures::truncated_blocks());
    let err = read_tag(&mut mock, &Uid::from("E002")).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
    assert!(!err.aborts_tick());
    Ok(())
}
