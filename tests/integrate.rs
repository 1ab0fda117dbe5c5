use std::{collections::BTreeMap, fs::File, io::Read};

use assert_cmd::Command;
use bank_accounts::csv::AccountSummary;

fn executable() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("BANK_USER").env_remove("BANK_PASSWORD");
    cmd
}

fn read_summary(reader: impl Read) -> anyhow::Result<BTreeMap<String, AccountSummary>> {
    let mut b = csv::ReaderBuilder::new();
    b.trim(csv::Trim::All);
    let mut rdr = b.from_reader(reader);

    let mut map = BTreeMap::new();
    for acc_summ in rdr.deserialize() {
        let acc_summ: AccountSummary = acc_summ?;

        assert!(map.insert(acc_summ.name.clone(), acc_summ).is_none());
    }

    Ok(map)
}

#[test]
fn system_test() {
    let out = executable()
        .args(["--user", "admin", "--password", "password"])
        .arg("./tests/csvs/in1.csv")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    //deserialize_output
    let out = read_summary(out.as_slice()).unwrap();
    let exp = File::open("./tests/csvs/out1.csv").unwrap();
    let exp = read_summary(exp).unwrap();
    assert_eq!(out, exp);
}

#[test]
fn history_report() {
    let out = executable()
        .args(["-u", "admin", "-p", "password", "--report", "history"])
        .arg("./tests/csvs/in2.csv")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let expected = "name,entry\r\n\
        sue,SavingAccount 'sam' created.\r\n\
        sue,Deposited $25.00. Balance: $125.00\r\n\
        sue,Balance changed from $125.00 to $200.00\r\n\
        sue,Renamed from 'sam' to 'sue'.\r\n";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn savings_policy_from_flags() {
    let out = executable()
        .args(["-u", "admin", "-p", "password"])
        .args(["--minimum", "50", "--rate", "0.1"])
        .args(["--deposits-per-interest", "1"])
        .arg("./tests/csvs/in2.csv")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    // 50 + 25 with interest, then set to 200
    let out = read_summary(out.as_slice()).unwrap();
    assert_eq!(out["sue"].balance, rust_decimal::Decimal::new(200, 0));
    assert_eq!(out["sue"].kind, "SavingAccount");
}

#[test]
fn login_is_required() {
    executable()
        .args(["--user", "admin", "--password", "wrong"])
        .arg("./tests/csvs/in1.csv")
        .assert()
        .failure();

    executable()
        .env("BANK_USER", "teller")
        .env("BANK_PASSWORD", "secret")
        .args(["--user", "teller", "--password", "secret"])
        .arg("./tests/csvs/in1.csv")
        .assert()
        .success();
}

#[test]
fn missing_script_fails() {
    executable()
        .args(["--user", "admin", "--password", "password"])
        .arg("./tests/csvs/does_not_exist.csv")
        .assert()
        .failure();
}

#[test]
fn oversized_and_invalid_rows_are_skipped() {
    let out = executable()
        .args(["--user", "admin", "--password", "password"])
        .arg("./tests/csvs/in3.csv")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let out = read_summary(out.as_slice()).unwrap();
    let expected = rust_decimal::Decimal::new(99_999_999, 2);
    assert_eq!(out["zed"].balance, expected);
}
