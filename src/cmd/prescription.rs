use anyhow::Result;
use serde_json::json;

use rxscan::core::prescriptions::{self, PrescriptionEdit};
use rxscan::db::Database;
use rxscan::models::PrescriptionStatus;
use rxscan::models::config::Config;
use rxscan::output;
use rxscan::output::human;

pub fn run_list(status: Option<PrescriptionStatus>, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let list = prescriptions::list_prescriptions(&db, status)?;

    if human_flag {
        println!("{}", human::format_prescription_table(&list));
    } else {
        let count = list.len();
        let out = output::success(
            "list",
            json!({
                "prescriptions": list,
                "count": count,
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_show(id: &str, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let rx = prescriptions::get_prescription(&db, id)?;

    if human_flag {
        println!("{}", human::format_prescription(&rx));
    } else {
        let out = output::success("show", json!({ "prescription": rx }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_edit(id: &str, edit: PrescriptionEdit<'_>, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let rx = prescriptions::edit_prescription(&db, id, edit)?;

    if human_flag {
        println!("Updated {}\n{}", rx.id, human::format_prescription(&rx));
    } else {
        let out = output::success("edit", json!({ "prescription": rx }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_status(id: &str, status: PrescriptionStatus, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let rx = prescriptions::set_status(&db, id, status)?;

    if human_flag {
        println!("{} is now {}", rx.name, rx.status);
    } else {
        let out = output::success(
            "status",
            json!({
                "id": rx.id,
                "status": rx.status,
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_remove(id: &str, yes: bool, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;

    if !yes {
        eprint!("Permanently delete prescription '{}'? [y/N] ", id);
        use std::io::{self, BufRead, Write};
        io::stderr().flush().ok();
        let mut buf = String::new();
        let bytes = io::stdin().lock().read_line(&mut buf)?;
        if bytes == 0 || !buf.trim().eq_ignore_ascii_case("y") {
            anyhow::bail!("Aborted.");
        }
    }

    if !prescriptions::remove_prescription(&db, id)? {
        anyhow::bail!("Prescription '{}' not found.", id);
    }

    if human_flag {
        println!("{}", human::format_remove(id));
    } else {
        let out = output::success(
            "remove",
            json!({
                "id": id,
                "removed": true,
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
