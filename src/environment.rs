use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;
use crate::token::Token;
use crate::error::RuntimeError;

/// A lexical frame mapping names to values, with an optional enclosing frame.
/// Frames are reference-shared: closures keep the frame they were created in
/// alive for as long as the closure itself lives.
#[derive(Debug, Clone)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    pub values: HashMap<String, Object>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment {
            enclosing,
            values: HashMap::new(),
        }
    }

    /// Binds a name in this frame, shadowing any previous binding.
    pub fn define(&mut self, name: &str, value: Object) {
        self.values.insert(name.to_string(), value);
    }

    /// Walks exactly `distance` enclosing links. The resolver guarantees the
    /// chain is at least that long whenever it hands out a depth.
    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let parent = self.enclosing.clone()
            .unwrap_or_else(|| panic!("enclosing environment to exist at depth {}", 1));
        let mut environment = Rc::clone(&parent);

        for i in 1..distance {
            let parent = environment.borrow().enclosing.clone()
                .unwrap_or_else(|| panic!("enclosing environment to exist at depth {}", i));
            environment = Rc::clone(&parent);
        }

        environment
    }

    /// Mutates the first frame up the chain that contains the name.
    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &mut self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    /// Writes the named slot exactly `distance` frames up, without fallback.
    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Object) {
        if distance > 0 {
            self.ancestor(distance).borrow_mut().values.insert(name.lexeme.clone(), value);
        } else {
            self.values.insert(name.lexeme.clone(), value);
        }
    }

    /// Reads a name, walking the enclosing chain.
    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    /// Reads the named slot exactly `distance` frames up, without fallback.
    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Object, RuntimeError> {
        let value = if distance > 0 {
            self.ancestor(distance).borrow().values.get(&name.lexeme).cloned()
        } else {
            self.values.get(&name.lexeme).cloned()
        };

        value.ok_or_else(|| RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn chain() -> (Rc<RefCell<Environment>>, Rc<RefCell<Environment>>, Rc<RefCell<Environment>>) {
        let global = Rc::new(RefCell::new(Environment::default()));
        let middle = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&global)))));
        let inner = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&middle)))));
        (global, middle, inner)
    }

    #[test]
    fn define_and_get() {
        let mut environment = Environment::default();
        environment.define("a", Object::from(1.0));
        assert_eq!(environment.get(&Token::from("a")).unwrap(), Object::from(1.0));
    }

    #[test]
    fn get_walks_enclosing_chain() {
        let (global, _middle, inner) = chain();
        global.borrow_mut().define("a", Object::from("global"));
        assert_eq!(inner.borrow().get(&Token::from("a")).unwrap(), Object::from("global"));
    }

    #[test]
    fn get_undefined_is_an_error() {
        let environment = Environment::default();
        let error = environment.get(&Token::from("missing")).unwrap_err();
        assert_eq!(error.message, "Undefined variable 'missing'.");
    }

    #[test]
    fn assign_mutates_first_frame_with_name() {
        let (global, middle, inner) = chain();
        global.borrow_mut().define("a", Object::from(1.0));
        middle.borrow_mut().define("a", Object::from(2.0));

        inner.borrow_mut().assign(&Token::from("a"), Object::from(3.0)).unwrap();

        assert_eq!(middle.borrow().get(&Token::from("a")).unwrap(), Object::from(3.0));
        assert_eq!(global.borrow().get(&Token::from("a")).unwrap(), Object::from(1.0));
    }

    #[test]
    fn assign_undefined_is_an_error() {
        let mut environment = Environment::default();
        let error = environment.assign(&Token::from("missing"), Object::from(1.0)).unwrap_err();
        assert_eq!(error.message, "Undefined variable 'missing'.");
    }

    #[test]
    fn get_at_walks_exactly_distance_links() {
        let (global, middle, inner) = chain();
        global.borrow_mut().define("a", Object::from("global"));
        middle.borrow_mut().define("a", Object::from("middle"));
        inner.borrow_mut().define("a", Object::from("inner"));

        assert_eq!(inner.borrow().get_at(0, &Token::from("a")).unwrap(), Object::from("inner"));
        assert_eq!(inner.borrow().get_at(1, &Token::from("a")).unwrap(), Object::from("middle"));
        assert_eq!(inner.borrow().get_at(2, &Token::from("a")).unwrap(), Object::from("global"));
    }

    #[test]
    fn assign_at_writes_the_exact_frame() {
        let (global, middle, inner) = chain();
        global.borrow_mut().define("a", Object::from("global"));
        middle.borrow_mut().define("a", Object::from("middle"));

        inner.borrow_mut().assign_at(2, &Token::from("a"), Object::from("updated"));

        assert_eq!(global.borrow().get_at(0, &Token::from("a")).unwrap(), Object::from("updated"));
        assert_eq!(middle.borrow().get_at(0, &Token::from("a")).unwrap(), Object::from("middle"));
    }
}
