use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes a roster where member `i` reports to member `i - 1`, so member
/// `size` sits at the bottom of a chain of `size - 1` managers. With
/// `cyclic`, member 1 reports to member `size`, closing the loop.
pub fn generate_chain_roster(path: &Path, size: u32, cyclic: bool) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["id", "name", "manager_id", "rate_card_id", "periods_worked", "moderation_hours"])?;

    for i in 1..=size {
        let manager = if i > 1 {
            (i - 1).to_string()
        } else if cyclic {
            size.to_string()
        } else {
            String::new()
        };
        wtr.write_record([&i.to_string(), &format!("Member {i}"), &manager, "", "", ""])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_events(path: &Path, rows: &[&str]) -> Result<(), Error> {
    let mut contents =
        String::from("type,request,actor,timestamp,decision,item,category,amount,vendor,budget\n");
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    std::fs::write(path, contents)
}
