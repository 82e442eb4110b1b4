use std::path::{Path, PathBuf};

const EXPORT: &str = r#";
"Umsätze Girokonto";"Zeitraum: 01.10.2010 - 16.01.2021";
"Neuer Kontostand";"1.134,11 EUR";

"Buchungstag";"Wertstellung (Valuta)";"Vorgang";"Buchungstext";"Umsatz in EUR";
"06.01.2021";"06.01.2021";"Lastschrift / Belastung";"Auftraggeber: Bäckerei Müller Buchungstext: Brötchen";"-9,00";
"04.01.2021";"04.01.2021";"Übertrag / Überweisung";"Empfänger: Max Mustermann Buchungstext: Miete";"-1.000,00";
"Alter Kontostand";"2.143,11 EUR";

;
"Umsätze Depot";"Zeitraum: 01.10.2010 - 16.01.2021";

"Buchungstag";"Geschäftstag";"Stück / Nom.";"Bezeichnung";"WKN";"Währung";"Ausführungskurs";"Umsatz in EUR";
"15.04.2020";"14.04.2020";"100";"SAP SE";"716460";"EUR";"51,91";"5.200,30";
"#;

const CONFIG: &str = r#"
[accounts]
checking = "Assets:Comdirect:Girokonto"
brokerage = "Assets:Comdirect:Depot"
"#;

struct TempDir(PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "beancount-comdirect-{}-{name}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        TempDir(path)
    }

    fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.0.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap())
        .collect()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn run(args: &[&str]) -> anyhow::Result<()> {
    let args = std::iter::once("beancount-comdirect")
        .chain(args.iter().copied())
        .map(str::to_string);
    beancount_comdirect_cli::run(args)
}

#[test]
fn extract_latin1_export() {
    let dir = TempDir::new("extract");
    let config = dir.write("config.toml", CONFIG);
    let export = dir.write("umsaetze.csv", latin1(EXPORT));
    let output = dir.path("out.beancount");

    run(&[
        "--config",
        arg(&config),
        "extract",
        "--output",
        arg(&output),
        arg(&export),
    ])
    .unwrap();

    insta::assert_snapshot!(std::fs::read_to_string(&output).unwrap(), @r#"
    2021-01-07 balance Assets:Comdirect:Girokonto 1134.11 EUR

    2021-01-06 * "Bäckerei Müller" "Brötchen"
      Assets:Comdirect:Girokonto  -9.00 EUR

    2021-01-04 * "Max Mustermann" "Miete"
      Assets:Comdirect:Girokonto  -1000.00 EUR

    2021-01-04 balance Assets:Comdirect:Girokonto 2143.11 EUR

    2020-04-15 * "SAP SE"
      Assets:TODO:Cash  -5200.30 EUR
      Expenses:TODO:Fees
      Assets:Comdirect:Depot  100 716460 {51.91 EUR}
    "#);
}

#[test]
fn extract_sorted() {
    let dir = TempDir::new("sorted");
    let config = dir.write("config.toml", "[accounts]\nchecking = \"Assets:Giro\"\n");
    let export = dir.write("umsaetze.csv", EXPORT);
    let output = dir.path("out.beancount");

    run(&[
        "--config",
        arg(&config),
        "extract",
        "--sort",
        "-o",
        arg(&output),
        arg(&export),
    ])
    .unwrap();

    insta::assert_snapshot!(std::fs::read_to_string(&output).unwrap(), @r#"
    2021-01-04 balance Assets:Giro 2143.11 EUR

    2021-01-04 * "Max Mustermann" "Miete"
      Assets:Giro  -1000.00 EUR

    2021-01-06 * "Bäckerei Müller" "Brötchen"
      Assets:Giro  -9.00 EUR

    2021-01-07 balance Assets:Giro 1134.11 EUR
    "#);
}

#[test]
fn malformed_section_writes_nothing() {
    let dir = TempDir::new("malformed");
    let config = dir.write("config.toml", CONFIG);
    let export = dir.write(
        "umsaetze.csv",
        EXPORT.replace(r#""-9,00";"#, r#""neun";"#),
    );
    let output = dir.path("out.beancount");

    let err = run(&[
        "--config",
        arg(&config),
        "extract",
        "-o",
        arg(&output),
        arg(&export),
    ])
    .unwrap_err();

    assert!(
        format!("{err:#}").contains("comdirect.checking"),
        "{err:#}"
    );
    assert!(!output.exists());
}

#[test]
fn invalid_config() {
    let dir = TempDir::new("config");
    let config = dir.write("config.toml", "[accounts]\n");
    let export = dir.write("umsaetze.csv", EXPORT);

    let err = run(&["--config", arg(&config), "extract", arg(&export)]).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config file"), "{err:#}");
}

#[test]
fn identify_without_config() {
    let dir = TempDir::new("identify");
    let export = dir.write("umsaetze.csv", latin1(EXPORT));
    let other = dir.write("other.csv", "Datum,Betrag\n");

    run(&["identify", arg(&export), arg(&other)]).unwrap();
}
