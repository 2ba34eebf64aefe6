use std::collections::BTreeMap;

use crate::{Object, ObjectId};

/// PDF document under construction.
///
/// Objects live in a map keyed by id, so serialization order is ascending id
/// order by construction rather than by convention.
pub struct Document {
    /// The version of the PDF specification to which the file conforms.
    pub version: String,

    /// The indirect objects that make up the document body.
    pub objects: BTreeMap<ObjectId, Object>,

    /// Maximum object id, also the id allocation cursor.
    pub max_id: u32,
}

impl Document {
    pub fn new() -> Document {
        Document::with_version("1.4")
    }

    pub fn with_version<S: Into<String>>(version: S) -> Document {
        Document {
            version: version.into(),
            objects: BTreeMap::new(),
            max_id: 0,
        }
    }

    /// Allocate the next object id without storing an object. The caller must
    /// insert an object under this id before saving.
    pub fn new_object_id(&mut self) -> ObjectId {
        self.max_id += 1;
        (self.max_id, 0)
    }

    /// Add a PDF object into the document's object list under a fresh id.
    pub fn add_object<T: Into<Object>>(&mut self, object: T) -> ObjectId {
        self.max_id += 1;
        let id = (self.max_id, 0);
        self.objects.insert(id, object.into());
        id
    }

    /// Look up an object, following references.
    pub fn get_object(&self, id: ObjectId) -> Option<&Object> {
        let object = self.objects.get(&id)?;
        if let Object::Reference(id) = object {
            self.get_object(*id)
        } else {
            Some(object)
        }
    }
}

impl Default for Document {
    fn default() -> Document {
        Document::new()
    }
}
