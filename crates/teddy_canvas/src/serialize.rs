//! Markup serialization for host subtrees.

use teddy_carton::{escape_attribute, escape_text, is_void_tag};

use crate::node::{HostId, HostKind};
use crate::tree::HostTree;

impl HostTree {
    /// Serialized markup of a node's children.
    ///
    /// Unknown ids serialize to an empty string.
    pub fn inner_html(&self, id: HostId) -> String {
        let mut out = String::new();
        if let Some(node) = self.get(id) {
            for &child in &node.children {
                self.write_node(child, &mut out);
            }
        }
        out
    }

    /// Serialized markup of a node including itself.
    pub fn outer_html(&self, id: HostId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: HostId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };

        match &node.kind {
            HostKind::Text(text) => out.push_str(&escape_text(text)),
            HostKind::Raw(markup) => out.push_str(markup),
            HostKind::Fragment => {
                for &child in &node.children {
                    self.write_node(child, out);
                }
            }
            HostKind::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for attr in &el.attributes {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    out.push_str(&escape_attribute(&attr.value));
                    out.push('"');
                }
                out.push('>');

                if is_void_tag(&el.tag) {
                    return;
                }

                for &child in &node.children {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::HostTree;

    #[test]
    fn test_nested_markup() {
        let mut tree = HostTree::new();
        let div = tree.create_element("div");
        let h1 = tree.create_element("h1");
        let text = tree.create_text("Hi");
        tree.set_attribute(div, "id", "x").unwrap();
        tree.append_child(h1, text).unwrap();
        tree.append_child(div, h1).unwrap();

        insta::assert_snapshot!(tree.outer_html(div), @r#"<div id="x"><h1>Hi</h1></div>"#);
        insta::assert_snapshot!(tree.inner_html(div), @"<h1>Hi</h1>");
    }

    #[test]
    fn test_void_element() {
        let mut tree = HostTree::new();
        let img = tree.create_element("img");
        tree.set_attribute(img, "src", "a.png").unwrap();
        assert_eq!(tree.outer_html(img), r#"<img src="a.png">"#);
    }

    #[test]
    fn test_escaping() {
        let mut tree = HostTree::new();
        let p = tree.create_element("p");
        let text = tree.create_text("1 < 2 & 3");
        tree.set_attribute(p, "title", r#"a "b""#).unwrap();
        tree.append_child(p, text).unwrap();
        assert_eq!(
            tree.outer_html(p),
            r#"<p title="a &quot;b&quot;">1 &lt; 2 &amp; 3</p>"#
        );
    }

    #[test]
    fn test_unknown_node_is_empty() {
        let tree = HostTree::new();
        assert_eq!(tree.inner_html(42), "");
        assert_eq!(tree.outer_html(42), "");
    }
}
