//! Payment request builder for the hosted checkout form.
//!
//! Every setter validates its input immediately and returns the builder, so a
//! request reads as a chain:
//!
//! ```
//! use paypal_standard::domain::checkout::PaymentRequest;
//!
//! # fn main() -> Result<(), paypal_standard::domain::checkout::CheckoutError> {
//! let mut request = PaymentRequest::sandbox();
//! request
//!     .set_amount("20.00")?
//!     .set_payee("seller@shop.example")?
//!     .set_item_name("My New eBook")?
//!     .set_on_success_url("https://shop.example/paypal")?
//!     .set_on_notify_url("https://shop.example/paypal")?;
//!
//! let form = request.render("<button>Pay now</button>")?;
//! assert!(form.contains(r#"name="amount" value="20.00""#));
//! # Ok(())
//! # }
//! ```
//!
//! # HTML boundary
//!
//! `render` substitutes field values into attributes verbatim. Values come
//! from the host application, which is responsible for keeping them safe for
//! an HTML attribute context. Payee addresses are not format-checked either;
//! the gateway rejects malformed ones.

use super::currency::CurrencyCode;
use super::endpoint::GatewayEndpoint;
use super::errors::CheckoutError;
use super::status::CheckoutStatus;

/// Gateway field names.
pub mod fields {
    pub const CMD: &str = "cmd";
    pub const CURRENCY_CODE: &str = "currency_code";
    pub const LOCALE: &str = "lc";
    pub const PAGE_STYLE: &str = "page_style";
    pub const RETURN_METHOD: &str = "rm";
    pub const AMOUNT: &str = "amount";
    pub const BUSINESS: &str = "business";
    pub const ITEM_NAME: &str = "item_name";
    pub const ITEM_NUMBER: &str = "item_number";
    pub const IMAGE_URL: &str = "image_url";
    pub const SHIPPING: &str = "shipping";
    pub const RETURN: &str = "return";
    pub const CANCEL_RETURN: &str = "cancel_return";
    pub const NOTIFY_URL: &str = "notify_url";
}

/// `name` attribute of the rendered form.
pub const FORM_NAME: &str = "FORM_PAYPAL";

const DEFAULT_CMD: &str = "_xclick";
const DEFAULT_LOCALE: &str = "US";
const DEFAULT_PAGE_STYLE: &str = "PayPal";
/// Return method 2: the buyer's browser is redirected with a POST.
const DEFAULT_RETURN_METHOD: &str = "2";

const EXPECT_NUMERIC: &str = "a numeric value";
const EXPECT_TEXT: &str = "a non-empty string";
const EXPECT_HTTP_URL: &str = "a URL starting with \"http://\"";
const EXPECT_WEB_URL: &str = "a URL starting with \"http://\" or \"https://\"";

/// A hosted checkout payment request.
///
/// The five default fields always lead. Every other field is kept in the
/// order it was first set; setting it again replaces the value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    endpoint: GatewayEndpoint,
    command: String,
    currency_code: String,
    locale: String,
    page_style: String,
    return_method: String,
    assigned: Vec<(String, String)>,
}

impl PaymentRequest {
    /// Creates a request with the default field set for the given endpoint.
    pub fn new(endpoint: GatewayEndpoint) -> Self {
        Self {
            endpoint,
            command: DEFAULT_CMD.to_string(),
            currency_code: CurrencyCode::default().as_str().to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            page_style: DEFAULT_PAGE_STYLE.to_string(),
            return_method: DEFAULT_RETURN_METHOD.to_string(),
            assigned: Vec::new(),
        }
    }

    /// Request posting to the sandbox gateway.
    pub fn sandbox() -> Self {
        Self::new(GatewayEndpoint::Sandbox)
    }

    /// Request posting to the live gateway.
    pub fn live() -> Self {
        Self::new(GatewayEndpoint::Live)
    }

    pub fn endpoint(&self) -> GatewayEndpoint {
        self.endpoint
    }

    // ════════════════════════════════════════════════════════════════════════
    // Setters
    // ════════════════════════════════════════════════════════════════════════

    /// Sets the price of the item. Required.
    ///
    /// Accepts integers and decimals (including zero and negatives) in any
    /// type that formats as a number; the formatted text is what gets sent.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the value is not numeric.
    pub fn set_amount(&mut self, amount: impl ToString) -> Result<&mut Self, CheckoutError> {
        let amount = numeric(fields::AMOUNT, amount.to_string())?;
        self.assign(fields::AMOUNT, amount);
        Ok(self)
    }

    /// Sets the currency from one of the codes the gateway accepts.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for any other code, including lowercase spellings.
    pub fn set_currency_code(&mut self, code: &str) -> Result<&mut Self, CheckoutError> {
        let code: CurrencyCode = code.parse()?;
        self.currency_code = code.as_str().to_string();
        Ok(self)
    }

    /// Sets the payee (the `business` field, usually the seller's email). Required.
    ///
    /// Any string is accepted, including an empty one; the gateway judges it.
    pub fn set_payee(&mut self, email: impl Into<String>) -> Result<&mut Self, CheckoutError> {
        self.assign(fields::BUSINESS, email.into());
        Ok(self)
    }

    /// Sets the logo shown on the gateway page.
    ///
    /// Only `http://` URLs are accepted; the sandbox does not serve `https://` images.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for any other scheme.
    pub fn set_image_url(&mut self, url: impl Into<String>) -> Result<&mut Self, CheckoutError> {
        let url = url.into();
        if !url.starts_with("http://") {
            return Err(CheckoutError::invalid_argument(
                fields::IMAGE_URL,
                EXPECT_HTTP_URL,
                url,
            ));
        }
        self.assign(fields::IMAGE_URL, url);
        Ok(self)
    }

    /// Sets the item description. Required.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when empty.
    pub fn set_item_name(&mut self, name: impl Into<String>) -> Result<&mut Self, CheckoutError> {
        let name = non_empty(fields::ITEM_NAME, name.into())?;
        self.assign(fields::ITEM_NAME, name);
        Ok(self)
    }

    /// Sets the pass-through item number echoed back in notifications.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the value is not numeric.
    pub fn set_item_number(&mut self, number: impl ToString) -> Result<&mut Self, CheckoutError> {
        let number = numeric(fields::ITEM_NUMBER, number.to_string())?;
        self.assign(fields::ITEM_NUMBER, number);
        Ok(self)
    }

    /// Sets a shipping charge added on top of the item price.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the value is not numeric.
    pub fn set_shipping(&mut self, shipping: impl ToString) -> Result<&mut Self, CheckoutError> {
        let shipping = numeric(fields::SHIPPING, shipping.to_string())?;
        self.assign(fields::SHIPPING, shipping);
        Ok(self)
    }

    /// Sets where the buyer lands after paying. `pp_a=success` is appended.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless the URL is `http://` or `https://`.
    pub fn set_on_success_url(&mut self, url: impl Into<String>) -> Result<&mut Self, CheckoutError> {
        let url = web_url(fields::RETURN, url.into())?;
        self.assign(fields::RETURN, CheckoutStatus::Success.correlate_url(&url));
        Ok(self)
    }

    /// Sets where the buyer lands after cancelling. `pp_a=cancel` is appended.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless the URL is `http://` or `https://`.
    pub fn set_on_cancel_url(&mut self, url: impl Into<String>) -> Result<&mut Self, CheckoutError> {
        let url = web_url(fields::CANCEL_RETURN, url.into())?;
        self.assign(fields::CANCEL_RETURN, CheckoutStatus::Cancel.correlate_url(&url));
        Ok(self)
    }

    /// Sets the IPN listener URL. `pp_a=notify` is appended.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless the URL is `http://` or `https://`.
    pub fn set_on_notify_url(&mut self, url: impl Into<String>) -> Result<&mut Self, CheckoutError> {
        let url = web_url(fields::NOTIFY_URL, url.into())?;
        self.assign(fields::NOTIFY_URL, CheckoutStatus::Notify.correlate_url(&url));
        Ok(self)
    }

    /// Sets any gateway field by name.
    ///
    /// Names with a dedicated setter are routed through it, so the same
    /// validation and correlation rules apply (`return`, `cancel_return` and
    /// `notify_url` get their `pp_a` tag). Other names are stored as given;
    /// setting one twice replaces the value in place.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty name or when the dedicated setter rejects the value.
    pub fn set_field(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<&mut Self, CheckoutError> {
        let value = value.into();
        match name {
            "" => Err(CheckoutError::invalid_argument(
                "field name",
                EXPECT_TEXT,
                name,
            )),
            fields::AMOUNT => self.set_amount(value),
            fields::CURRENCY_CODE => self.set_currency_code(&value),
            fields::BUSINESS => self.set_payee(value),
            fields::IMAGE_URL => self.set_image_url(value),
            fields::ITEM_NAME => self.set_item_name(value),
            fields::ITEM_NUMBER => self.set_item_number(value),
            fields::SHIPPING => self.set_shipping(value),
            fields::RETURN => self.set_on_success_url(value),
            fields::CANCEL_RETURN => self.set_on_cancel_url(value),
            fields::NOTIFY_URL => self.set_on_notify_url(value),
            fields::CMD => {
                self.command = value;
                Ok(self)
            }
            fields::LOCALE => {
                self.locale = value;
                Ok(self)
            }
            fields::PAGE_STYLE => {
                self.page_style = value;
                Ok(self)
            }
            fields::RETURN_METHOD => {
                self.return_method = value;
                Ok(self)
            }
            _ => {
                self.assign(name, value);
                Ok(self)
            }
        }
    }

    fn assign(&mut self, name: &str, value: String) {
        match self.assigned.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.assigned.push((name.to_string(), value)),
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════════

    /// Every field that will be rendered, in render order.
    ///
    /// Defaults come first, then every other field in the order it was first set.
    pub fn fields(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = vec![
            (fields::CMD, self.command.as_str()),
            (fields::CURRENCY_CODE, self.currency_code.as_str()),
            (fields::LOCALE, self.locale.as_str()),
            (fields::PAGE_STYLE, self.page_style.as_str()),
            (fields::RETURN_METHOD, self.return_method.as_str()),
        ];

        out.extend(self.assigned.iter().map(|(n, v)| (n.as_str(), v.as_str())));
        out
    }

    /// Looks up the stored value of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Returns true once `amount`, `business` and `item_name` are all set.
    pub fn is_complete(&self) -> bool {
        self.check_required().is_ok()
    }

    fn check_required(&self) -> Result<(), CheckoutError> {
        for required in [fields::AMOUNT, fields::BUSINESS, fields::ITEM_NAME] {
            if !self.assigned.iter().any(|(name, _)| name == required) {
                return Err(CheckoutError::missing(required));
            }
        }
        Ok(())
    }

    // ════════════════════════════════════════════════════════════════════════
    // Rendering
    // ════════════════════════════════════════════════════════════════════════

    /// Renders the checkout form.
    ///
    /// `extra_content` (typically the submit button) is embedded verbatim before
    /// the hidden inputs. Rendering does not modify the request, so repeated
    /// calls produce identical markup.
    ///
    /// # Errors
    ///
    /// `InvalidState` naming the first unset field among `amount`, `business`, `item_name`.
    pub fn render(&self, extra_content: &str) -> Result<String, CheckoutError> {
        self.check_required()?;

        let mut form = format!(
            r#"<form name="{}" method="post" action="{}">"#,
            FORM_NAME,
            self.endpoint.url()
        );
        form.push_str(extra_content);
        for (name, value) in self.fields() {
            form.push_str(&format!(
                r#"<input type="hidden" name="{name}" value="{value}">"#
            ));
        }
        form.push_str("</form>");
        Ok(form)
    }
}

impl Default for PaymentRequest {
    fn default() -> Self {
        Self::sandbox()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Validation helpers
// ════════════════════════════════════════════════════════════════════════════

fn numeric(field: &str, value: String) -> Result<String, CheckoutError> {
    if is_numeric(&value) {
        Ok(value)
    } else {
        Err(CheckoutError::invalid_argument(field, EXPECT_NUMERIC, value))
    }
}

fn non_empty(field: &str, value: String) -> Result<String, CheckoutError> {
    if value.is_empty() {
        Err(CheckoutError::invalid_argument(field, EXPECT_TEXT, value))
    } else {
        Ok(value)
    }
}

fn web_url(field: &str, url: String) -> Result<String, CheckoutError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url)
    } else {
        Err(CheckoutError::invalid_argument(field, EXPECT_WEB_URL, url))
    }
}

/// Decimal number check: optional sign, digits with an optional fraction
/// (or a bare fraction like `.5`), optional exponent. Surrounding whitespace
/// is tolerated; `inf`, `NaN` and hex are not numbers.
pub(crate) fn is_numeric(value: &str) -> bool {
    let s = value.trim().as_bytes();
    let mut i = 0;

    if matches!(s.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < s.len() && s[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < s.len() && s[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < s.len() && s[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits + frac_digits == 0 {
        return false;
    }

    if i < s.len() && matches!(s[i], b'e' | b'E') {
        i += 1;
        if matches!(s.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < s.len() && s[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == s.len()
}
