use crate::backend::*;
use crate::wrapper::Graph;
use crate::{Error, Result};
use ahash::RandomState;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::io::{Read, Write};

/// Node-link form of a label-addressed graph, as read and written in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkData<L> {
    pub directed: bool,
    pub multigraph: bool,
    #[serde(default)]
    pub graph: Attributes,
    pub nodes: Vec<NodeEntry<L>>,
    pub links: Vec<LinkEntry<L>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeEntry<L> {
    pub id: L,
    #[serde(flatten)]
    pub attrs: Attributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry<L> {
    pub source: L,
    pub target: L,
    #[serde(flatten)]
    pub attrs: Attributes,
}

impl<L> LabeledGraph<L>
where
    L: Clone + Eq + Ord + Hash + Debug,
{
    /// Nodes and links in canonical order.
    ///
    /// Fails with `InvalidAttribute` if a node has an attribute named `id`, or a link one
    /// named `source` or `target`, since those keys hold the endpoints in node-link form.
    pub fn to_node_link(&self) -> Result<NodeLinkData<L>> {
        let mut nodes = Vec::with_capacity(self.node_count());
        for id in self.node_ids() {
            let attrs = self.node_data(&id)?;
            reject_reserved(&id, attrs, &["id"])?;
            nodes.push(NodeEntry {
                attrs: attrs.clone(),
                id,
            });
        }
        let mut links = Vec::with_capacity(self.edge_count());
        for e in self.edges() {
            reject_reserved(&e.id, e.data, &["source", "target"])?;
            links.push(LinkEntry {
                source: e.u,
                target: e.v,
                attrs: e.data.clone(),
            });
        }
        Ok(NodeLinkData {
            directed: false,
            multigraph: false,
            graph: Attributes::new(),
            nodes,
            links,
        })
    }

    /// Builds a graph from node-link data.
    ///
    /// Directed graphs and multigraphs are rejected, and so are links repeating a pair of
    /// endpoints.
    pub fn from_node_link(data: NodeLinkData<L>) -> Result<Self> {
        if data.directed {
            return Err(Error::unsupported("directed graph"));
        }
        if data.multigraph {
            return Err(Error::unsupported("multigraph"));
        }
        let mut res = Self::new();
        for n in data.nodes.into_iter() {
            res.add_node(n.id, n.attrs);
        }
        let mut seen = HashSet::with_capacity_and_hasher(data.links.len(), RandomState::new());
        for l in data.links.into_iter() {
            let e = res.add_edge(&l.source, &l.target, l.attrs)?;
            if !seen.insert(e) {
                return Err(Error::unsupported(format!(
                    "multi-edge between {:?} and {:?}",
                    l.source, l.target
                )));
            }
        }
        Ok(res)
    }
}

impl<L> LabeledGraph<L>
where
    L: Clone + Eq + Ord + Hash + Debug + Serialize + DeserializeOwned,
{
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, &self.to_node_link()?)?;
        Ok(())
    }

    pub fn read_json<R: Read>(reader: R) -> Result<Self> {
        let data: NodeLinkData<L> = serde_json::from_reader(reader)?;
        Self::from_node_link(data)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.to_node_link()?)?)
    }
}

fn reject_reserved<I: Debug>(id: &I, attrs: &Attributes, reserved: &[&str]) -> Result<()> {
    match reserved.iter().find_map(|k| attrs.get_key_value(*k)) {
        Some((key, value)) => Err(Error::InvalidAttribute {
            id: format!("{:?}", id),
            attr: key.clone(),
            value: value.clone(),
        }),
        None => Ok(()),
    }
}

impl<L, P> Graph<LabeledGraph<L>, P>
where
    L: Clone + Eq + Ord + Hash + Debug + Serialize + DeserializeOwned,
{
    /// Writes the graph as node-link JSON. Provenance is not written.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        self.backend().write_json(writer)
    }
}
