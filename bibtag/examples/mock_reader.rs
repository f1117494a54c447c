//! Run the poll worker against an in-memory reader.
//!
//! Usage:
//!   RUST_LOG=bibtag=debug cargo run -p bibtag --example mock_reader

use std::thread;
use std::time::Duration;

use bibtag::transport::MockTransport;
use bibtag::{Mid, ReaderBuilder, ReaderConfig, Result, TagListener, TagRecord, Uid};

struct PrintListener;

impl TagListener for PrintListener {
    fn on_tag_arrived(&mut self, tag: &TagRecord) {
        println!("+ {} item {}", tag.uid(), tag.item_id());
    }

    fn on_tag_departed(&mut self, tag: &TagRecord) {
        println!("- {} item {}", tag.uid(), tag.item_id());
    }

    fn on_tags_snapshot(&mut self, tags: &[TagRecord]) {
        println!("field: {} tag(s)", tags.len());
        for tag in tags {
            println!("  {}", tag);
        }
    }

    fn on_afi_write_result(&mut self, uid: &Uid, success: bool) {
        println!("AFI write to {}: {}", uid, if success { "ok" } else { "failed" });
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let field = MockTransport::new();
    field.insert_tag("E00401003C4A5B01", &Mid::new("1101010000012345")?)?;

    let mut reader = ReaderBuilder::new()
        .with_transport(Box::new(field.clone()))
        .with_listener(Box::new(PrintListener))
        .with_config(ReaderConfig::default().with_poll_interval(Duration::from_millis(100)))
        .build()?;
    reader.start()?;

    thread::sleep(Duration::from_millis(300));
    println!("placing a two-volume set on the reader");
    field.insert_tag("E00401003C4A5B02", &Mid::new("1102010000067890")?)?;
    field.insert_tag("E00401003C4A5B03", &Mid::new("1102020000067890")?)?;

    thread::sleep(Duration::from_millis(300));
    println!("checking out the first item");
    reader.enqueue_set_afi("E00401003C4A5B01", "194")?;
    reader.request_snapshot();

    thread::sleep(Duration::from_millis(300));
    field.remove_tag("E00401003C4A5B01");

    thread::sleep(Duration::from_millis(300));
    reader.shutdown()
}
