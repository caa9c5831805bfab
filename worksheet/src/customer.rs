use kengine::Indexable;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;

/// Records with at least this income become [`HighEarner`]s.
pub const HIGH_EARNER_INCOME: f32 = 10_000_000.0;

/// Float text the way the worksheet has always shown it: `1.0E8`, `12.5`, `100.0`.
/// Scientific notation outside `[1e-3, 1e7)`, always at least one fraction digit.
pub fn float_text(x: f32) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    let with_fraction = |m: &str| if m.contains('.') { m.to_string() } else { format!("{m}.0") };
    let a = x.abs();
    if a == 0.0 || (1e-3..1e7).contains(&a) {
        return with_fraction(x.to_string().as_str());
    }
    let s = format!("{x:e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => format!("{}E{exp}", with_fraction(mantissa)),
        None => s,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: u32,
    pub name: String,
    pub phone_number: String,
    pub address: String,
}

impl Customer {
    pub fn new(id: u32, name: &str, phone_number: &str, address: &str) -> Self {
        Self { id, name: name.into(), phone_number: phone_number.into(), address: address.into() }
    }

    fn html(&self, kind: &str, extra: Option<String>) -> String {
        let mut body = format!("{} {} {} {}", self.id, self.name, self.phone_number, self.address);
        if let Some(extra) = extra {
            body.push(' ');
            body.push_str(&extra);
        }
        format!(
            "<html><head><title>{kind}: {}</title></head><body>{body}</body></html>",
            self.name
        )
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customer:<{}, {}, {}, {}>", self.id, self.name, self.phone_number, self.address)
    }
}

impl Indexable for Customer {
    fn to_indexable_text(&self) -> String {
        self.html("Customer", None)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighEarner {
    pub customer: Customer,
    pub income: f32,
}

impl fmt::Display for HighEarner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.customer;
        write!(f, "HighEarner:<{}, {}, {}, {}, {}>", c.id, c.name, c.phone_number, c.address, float_text(self.income))
    }
}

impl Indexable for HighEarner {
    fn to_indexable_text(&self) -> String {
        self.customer.html("HighEarner", Some(float_text(self.income)))
    }
}

/// Either kind of customer held by the worksheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Customer(Customer),
    HighEarner(HighEarner),
}

impl Record {
    pub fn customer(&self) -> &Customer {
        match self {
            Record::Customer(c) => c,
            Record::HighEarner(h) => &h.customer,
        }
    }

    pub fn name(&self) -> &str {
        &self.customer().name
    }

    pub fn income(&self) -> Option<f32> {
        match self {
            Record::Customer(_) => None,
            Record::HighEarner(h) => Some(h.income),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Customer(c) => fmt::Display::fmt(c, f),
            Record::HighEarner(h) => fmt::Display::fmt(h, f),
        }
    }
}

impl Indexable for Record {
    fn to_indexable_text(&self) -> String {
        match self {
            Record::Customer(c) => c.to_indexable_text(),
            Record::HighEarner(h) => h.to_indexable_text(),
        }
    }
}

/// Report order: by name, then id so equal names stay distinct.
pub fn by_name(a: &Record, b: &Record) -> Ordering {
    a.name().cmp(b.name()).then_with(|| a.customer().id.cmp(&b.customer().id))
}

/// One customer as it appears in JSON input.
#[derive(Debug, Deserialize)]
pub struct InputCustomer {
    pub id: u32,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    #[serde(default)]
    pub income: f32,
}

impl From<InputCustomer> for Record {
    fn from(input: InputCustomer) -> Self {
        let customer = Customer {
            id: input.id,
            name: input.name,
            phone_number: input.phone_number,
            address: input.address,
        };
        if input.income >= HIGH_EARNER_INCOME {
            Record::HighEarner(HighEarner { customer, income: input.income })
        } else {
            Record::Customer(customer)
        }
    }
}

/// The five customers the worksheet starts with when given no input.
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::Customer(Customer::new(1, "James", "12345678", "HCM")),
        Record::Customer(Customer::new(2, "Peter", "12345679", "Hanoi")),
        Record::Customer(Customer::new(3, "Lucas", "12345694", "HCM")),
        Record::Customer(Customer::new(4, "John john", "12345678", "Hanoi")),
        Record::HighEarner(HighEarner {
            customer: Customer::new(5, "Andrew john", "12345680", "Hanoi"),
            income: 100_000_000.0,
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_html_with_title() {
        let c = Customer::new(1, "James", "12345678", "HCM");
        assert_eq!(
            c.to_indexable_text(),
            "<html><head><title>Customer: James</title></head><body>1 James 12345678 HCM</body></html>"
        );
        assert_eq!(c.title_from(&c.to_indexable_text()), "Customer: James");
        assert_eq!(c.to_string(), "Customer:<1, James, 12345678, HCM>");
    }

    #[test]
    fn high_earner_income_in_scientific_form() {
        let h = HighEarner { customer: Customer::new(5, "Andrew john", "12345680", "Hanoi"), income: 100_000_000.0 };
        assert_eq!(
            h.to_indexable_text(),
            "<html><head><title>HighEarner: Andrew john</title></head><body>5 Andrew john 12345680 Hanoi 1.0E8</body></html>"
        );
        assert_eq!(h.to_string(), "HighEarner:<5, Andrew john, 12345680, Hanoi, 1.0E8>");
    }

    #[test]
    fn float_text_forms() {
        assert_eq!(float_text(1.0e8), "1.0E8");
        assert_eq!(float_text(1.5e7), "1.5E7");
        assert_eq!(float_text(10_000_000.0), "1.0E7");
        assert_eq!(float_text(12.5), "12.5");
        assert_eq!(float_text(100.0), "100.0");
        assert_eq!(float_text(0.0), "0.0");
        assert_eq!(float_text(0.0001), "1.0E-4");
    }

    #[test]
    fn income_threshold_picks_kind() {
        let input = |income| InputCustomer {
            id: 9,
            name: "Ann".into(),
            phone_number: "1".into(),
            address: "Hue".into(),
            income,
        };
        assert!(matches!(Record::from(input(0.0)), Record::Customer(_)));
        assert!(matches!(Record::from(input(9_999_999.0)), Record::Customer(_)));
        let rich = Record::from(input(HIGH_EARNER_INCOME));
        assert_eq!(rich.income(), Some(HIGH_EARNER_INCOME));
        assert!(rich.title_from(&rich.to_indexable_text()).starts_with("HighEarner: "));
    }
}
