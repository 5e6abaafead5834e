/// An ordered collection of query parameters for a REST request.
///
/// Keeps insertion order, so the resulting query string is stable. Setting a key twice
/// replaces the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    inner: Vec<(String, String)>,
}

impl Parameters {
    /// Creates a new empty collection of parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter to the collection
    pub fn param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(key.into(), value.into());
        self
    }

    /// Appends a parameter, keeping earlier values under the same key
    pub fn append<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.inner.push((key.into(), value.into()));
        self
    }

    /// Adds a parameter only when a non-empty value is given
    pub fn param_opt<K, V>(self, key: K, value: Option<V>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        match value.map(Into::into) {
            Some(value) if !value.is_empty() => self.param(key, value),
            _ => self,
        }
    }

    /// Adds a boolean parameter rendered as the literal `true` or `false`
    pub fn flag<K>(self, key: K, value: bool) -> Self
    where
        K: Into<String>,
    {
        self.param(key, if value { "true" } else { "false" })
    }

    /// Adds a parameter whose value is the comma-joined list, or `default` when the list is empty
    pub fn joined<K, I, S>(self, key: K, values: I, default: &str) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .filter(|value| !value.as_ref().is_empty())
            .map(|value| value.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        if joined.is_empty() {
            self.param(key, default)
        } else {
            self.param(key, joined)
        }
    }

    /// Returns the value of a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns whether no parameters were added
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the inner list of parameters
    pub fn into_inner(self) -> Vec<(String, String)> {
        self.inner
    }

    /// Returns a reference to the inner list of parameters
    pub fn as_inner(&self) -> &[(String, String)] {
        &self.inner
    }

    /// Appends the parameters to the query string of `url`
    pub fn apply_to(&self, url: &mut url::Url) {
        if self.inner.is_empty() {
            return;
        }
        url.query_pairs_mut().extend_pairs(self.inner.iter());
    }

    fn insert(&mut self, key: String, value: String) {
        match self.inner.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.inner.push((key, value)),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Parameters::new(), |params, (k, v)| params.param(k, v))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Parameters {
    fn from(arr: [(&str, &str); N]) -> Self {
        arr.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_and_replaces_duplicates() {
        let params = Parameters::new()
            .param("b", "1")
            .param("a", "2")
            .param("b", "3");
        assert_eq!(
            params.as_inner(),
            &[
                ("b".to_string(), "3".to_string()),
                ("a".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn optional_and_joined_values() {
        let params = Parameters::new()
            .param_opt("City", None::<String>)
            .param_opt("Street", Some(""))
            .param_opt("HouseNr", Some("42"))
            .joined("Options", Vec::<String>::new(), "Daytime")
            .joined("Other", ["Evening", "", "Sunday"], "Daytime")
            .flag("AllowSundaySorting", false);

        assert_eq!(params.get("City"), None);
        assert_eq!(params.get("Street"), None);
        assert_eq!(params.get("HouseNr"), Some("42"));
        assert_eq!(params.get("Options"), Some("Daytime"));
        assert_eq!(params.get("Other"), Some("Evening,Sunday"));
        assert_eq!(params.get("AllowSundaySorting"), Some("false"));
    }

    #[test]
    fn empty_parameters_leave_the_url_untouched() {
        let mut url = url::Url::parse("https://api.postnl.nl/shipment/v2/status").unwrap();
        Parameters::new().apply_to(&mut url);
        assert_eq!(url.query(), None);

        Parameters::from([("detail", "true")]).apply_to(&mut url);
        assert_eq!(url.query(), Some("detail=true"));

        let mut url = url::Url::parse("https://api.postnl.nl/shipment/v2/status").unwrap();
        Parameters::new()
            .append("period", "a")
            .append("period", "b")
            .apply_to(&mut url);
        assert_eq!(url.query(), Some("period=a&period=b"));
    }
}
