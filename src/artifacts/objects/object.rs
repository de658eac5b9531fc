use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};

/// Encodes an object's payload (without the type header)
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Decodes an object's payload (the type header has already been stripped)
pub trait Unpackable {
    fn deserialize(content: &[u8]) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn object_id(&self) -> Result<ObjectId> {
        Ok(hash_object(self.object_type(), &self.serialize()?))
    }
}

/// Stored form of an object: `<type>\0<content>`
pub fn frame(object_type: ObjectType, content: &[u8]) -> Bytes {
    let mut framed = Vec::with_capacity(object_type.as_str().len() + 1 + content.len());
    framed.extend_from_slice(object_type.as_str().as_bytes());
    framed.push(b'\0');
    framed.extend_from_slice(content);
    framed.into()
}

/// Content address of a payload of the given type
pub fn hash_object(object_type: ObjectType, content: &[u8]) -> ObjectId {
    let mut hasher = Sha1::new();
    hasher.update(object_type.as_str().as_bytes());
    hasher.update(b"\0");
    hasher.update(content);

    ObjectId::from_digest(&hasher.finalize())
}
